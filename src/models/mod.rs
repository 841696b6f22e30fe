pub mod clothing;
pub mod fusion;
pub mod outfit;
pub mod product;

pub use clothing::{Category, ClothingItem, InvalidCategory};
pub use fusion::{FusionDesign, FusionSpec};
pub use outfit::{ImageStyle, Outfit, OutfitRequest, OutfitSlot, SelectedPiece};
pub use product::{Product, RankedProduct, RankingBreakdown};
