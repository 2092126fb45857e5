pub mod traits;
pub mod configured;

pub use traits::{MarketLabels, SiteAdapter};
pub use configured::{ConfiguredSite, SiteConfig, PRESET_SITES};
