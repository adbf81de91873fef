//! `shopfront show` - product detail with related items.

use anyhow::Result;
use clap::Args;
use console::style;

use shopfront_catalog::primary_image_url;
use shopfront_store::{DetailViewState, ProductStore};

use crate::context::Context;
use crate::output::Output;

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Product identifier
    pub id: u64,
}

pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ProductStore::new(ctx.api());

    let spinner = ctx.output.spinner("Loading product...");
    store.load_detail(Some(args.id)).await;
    spinner.finish_and_clear();

    render_detail(&ctx.output, &store);
    Ok(())
}

/// Render the detail view branch the store derived.
pub fn render_detail(output: &Output, store: &ProductStore) {
    match store.view_state() {
        DetailViewState::Idle | DetailViewState::Loading => output.info("Loading product..."),
        DetailViewState::Error(message) => {
            output.error(&message);
            output.info("Try again with the same command.");
        }
        DetailViewState::NotFound => output.warn("Product not found"),
        DetailViewState::Ready { product, related } => {
            println!("{}", style(&product.title).bold().underlined());
            println!(
                "{}  {}",
                style(format!("${:.2}", product.price)).green().bold(),
                style(&product.category.title).magenta()
            );
            println!();
            println!("{}", product.description);
            println!(
                "{}",
                style(primary_image_url(&product.images)).dim().underlined()
            );

            if !related.is_empty() {
                println!();
                println!("{}", style("Related Items").bold());
                for item in &related {
                    println!(
                        "{:>6}  {}  {}",
                        style(format!("#{}", item.id)).dim(),
                        item.title,
                        style(format!("${:.2}", item.price)).green()
                    );
                }
            }
        }
    }
}
