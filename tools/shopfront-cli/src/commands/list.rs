//! `shopfront list` - render one page of the catalog.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use console::style;

use shopfront_catalog::{primary_image_url, Product};
use shopfront_store::{CatalogStore, ListViewState, MemoryUrlSource, UrlSource, UrlUpdate};

use crate::context::Context;
use crate::output::Output;

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Title search text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category ids to filter by (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<u64>,

    /// Page to display
    #[arg(short, long)]
    pub page: Option<u32>,
}

pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    // Encode the arguments the way the address bar would carry them and
    // hydrate from that, so one-shot runs go down the same path as a
    // browser session.
    let initial = UrlUpdate {
        search: args.search,
        category_ids: (!args.categories.is_empty()).then(|| args.categories.clone()),
        page: args.page,
    }
    .apply("");

    let url = Arc::new(MemoryUrlSource::with_query(&initial));
    let store = CatalogStore::new(ctx.api(), url.clone());

    let spinner = ctx.output.spinner("Loading products...");
    store.hydrate_from_url().await;
    spinner.finish_and_clear();

    ctx.output.debug(&format!("/products?{}", url.query_string()));
    render_results(&ctx.output, &store);
    Ok(())
}

/// Render the list view branch the store derived.
pub fn render_results(output: &Output, store: &CatalogStore) {
    match store.view_state() {
        ListViewState::Loading => output.info("Loading products..."),
        ListViewState::Error(message) => {
            output.error(&message);
            output.info("Try again with the same command.");
        }
        ListViewState::EmptyFiltered => {
            output.info("No products found matching your criteria");
        }
        ListViewState::EmptyCatalog => output.info("No products available"),
        ListViewState::Ready => {
            println!(
                "{} {}",
                style("Total Products").bold(),
                style(store.total_products()).bold().cyan()
            );
            println!();
            for product in store.paginated_products() {
                render_product_card(&product);
            }
            let pagination = store.pagination();
            if pagination.total_pages > 1 {
                println!(
                    "{}",
                    style(format!(
                        "Page {} of {}",
                        pagination.page, pagination.total_pages
                    ))
                    .dim()
                );
            }
        }
    }
}

fn render_product_card(product: &Product) {
    println!(
        "{:>6}  {}  {}",
        style(format!("#{}", product.id)).dim(),
        style(&product.title).bold(),
        style(format!("${:.2}", product.price)).green()
    );
    println!(
        "        {}  {}",
        style(&product.category.title).magenta(),
        style(truncate(&product.description, 60)).dim()
    );
    println!(
        "        {}",
        style(primary_image_url(&product.images)).dim().underlined()
    );
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
