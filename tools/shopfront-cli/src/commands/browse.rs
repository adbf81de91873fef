//! `shopfront browse` - interactive storefront session.
//!
//! Drives the stores the way the browsing UI does: search submits, filter
//! changes, and page navigation all go through the store, which keeps the
//! displayed query string in sync.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use console::{style, Term};
use dialoguer::{Input, MultiSelect, Select};

use shopfront_store::{CatalogStore, MemoryUrlSource, ProductStore, UrlSource};

use crate::commands::{list, show};
use crate::context::Context;

/// Arguments for `browse`.
#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Initial query string, e.g. "search=shirt&categories=2&page=2"
    #[arg(short, long)]
    pub query: Option<String>,
}

pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let term = Term::stdout();
    let url = Arc::new(MemoryUrlSource::with_query(
        args.query.as_deref().unwrap_or(""),
    ));
    let catalog = CatalogStore::new(ctx.api(), url.clone());
    let detail = ProductStore::new(ctx.api());

    let spinner = ctx.output.spinner("Loading products...");
    catalog.hydrate_from_url().await;
    spinner.finish_and_clear();

    loop {
        println!();
        println!("{}", style(format!("/products?{}", url.query_string())).dim());
        list::render_results(&ctx.output, &catalog);
        println!();

        let pagination = catalog.pagination();
        let mut actions = vec!["Search", "Filter by category"];
        if pagination.has_next {
            actions.push("Next page");
        }
        if pagination.has_prev {
            actions.push("Previous page");
        }
        if !catalog.paginated_products().is_empty() {
            actions.push("View product");
        }
        if catalog.error().is_some() {
            actions.push("Try Again");
        }
        actions.push("Quit");

        let selection = Select::new()
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()?;

        match actions[selection] {
            "Search" => {
                let text: String = Input::new()
                    .with_prompt("Search Product")
                    .with_initial_text(catalog.query().search_text)
                    .allow_empty(true)
                    .interact_text()?;
                catalog.set_search_text(text);

                let spinner = ctx.output.spinner("Searching...");
                catalog.search().await;
                spinner.finish_and_clear();
            }
            "Filter by category" => {
                let options = catalog.category_options();
                if options.is_empty() {
                    ctx.output.warn("No categories available");
                    continue;
                }
                let selected_ids = catalog.query().category_ids();
                let items: Vec<String> =
                    options.iter().map(|option| option.title.clone()).collect();
                let defaults: Vec<bool> = options
                    .iter()
                    .map(|option| selected_ids.contains(&option.category_id))
                    .collect();
                let picks = MultiSelect::new()
                    .with_prompt("Filter")
                    .items(&items)
                    .defaults(&defaults)
                    .interact()?;
                let filters = picks
                    .into_iter()
                    .map(|index| options[index].clone())
                    .collect();

                let spinner = ctx.output.spinner("Filtering...");
                catalog.filter_change(filters).await;
                spinner.finish_and_clear();
            }
            "Next page" => {
                catalog.page_change(pagination.page + 1);
                term.clear_screen()?;
            }
            "Previous page" => {
                catalog.page_change(pagination.page.saturating_sub(1));
                term.clear_screen()?;
            }
            "View product" => {
                let page = catalog.paginated_products();
                let items: Vec<String> = page
                    .iter()
                    .map(|product| format!("{} (${:.2})", product.title, product.price))
                    .collect();
                let pick = Select::new()
                    .with_prompt("Product")
                    .items(&items)
                    .interact()?;

                let spinner = ctx.output.spinner("Loading product...");
                detail.load_detail(Some(page[pick].id)).await;
                spinner.finish_and_clear();

                println!();
                show::render_detail(&ctx.output, &detail);
                println!();
                let _: String = Input::new()
                    .with_prompt("Press enter to go back")
                    .allow_empty(true)
                    .interact_text()?;
                detail.clear();
            }
            "Try Again" => {
                let spinner = ctx.output.spinner("Loading products...");
                catalog.retry().await;
                spinner.finish_and_clear();
            }
            _ => break,
        }
    }

    Ok(())
}
