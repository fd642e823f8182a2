pub mod njuskalo;
pub mod text;
pub mod traits;
pub mod types;

pub use njuskalo::{NjuskaloScraper, ScraperConfig};
pub use traits::ScraperTrait;
pub use types::SearchFilter;
