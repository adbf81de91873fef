//! `shopfront categories` - list the available category filters.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use console::style;

use shopfront_store::{CatalogStore, MemoryUrlSource};

use crate::context::Context;

/// Arguments for `categories`.
#[derive(Args, Debug)]
pub struct CategoriesArgs {}

pub async fn run(_args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let url = Arc::new(MemoryUrlSource::new());
    let store = CatalogStore::new(ctx.api(), url);

    let spinner = ctx.output.spinner("Loading categories...");
    store.ensure_categories().await;
    spinner.finish_and_clear();

    let options = store.category_options();
    if options.is_empty() {
        ctx.output.warn("No categories available");
        return Ok(());
    }

    for option in options {
        println!("{:>6}  {}", style(&option.key).dim(), option.title);
    }
    Ok(())
}
