pub mod cache;

pub use cache::PriceCache;
