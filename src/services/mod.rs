pub mod catalog;
pub mod categorizer;
pub mod fixtures;
pub mod fusion;
pub mod marketplace;
pub mod outfit;
pub mod providers;

pub use catalog::{Catalog, CatalogStore};
pub use marketplace::Ranker;
pub use providers::Stylist;
