//! CLI subcommands.

pub mod browse;
pub mod categories;
pub mod list;
pub mod show;

pub use browse::BrowseArgs;
pub use categories::CategoriesArgs;
pub use list::ListArgs;
pub use show::ShowArgs;
