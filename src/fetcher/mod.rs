pub mod traits;
pub mod yahoo;
pub mod loader;

pub use loader::SeriesLoader;
pub use traits::PriceSource;
pub use yahoo::YahooSource;
