use crate::fetcher::traits::PriceSource;
use crate::model::{FetchRequest, LoadError, PriceSeries};
use crate::parser::Parser;
use crate::storage::PriceCache;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Cache-first access to price series. The cache is owned by the caller and
/// shared with the loader.
pub struct SeriesLoader<S, P> {
    source: S,
    parser: P,
    cache: Arc<Mutex<PriceCache>>,
}

impl<S: PriceSource, P: Parser> SeriesLoader<S, P> {
    pub fn new(source: S, parser: P, cache: Arc<Mutex<PriceCache>>) -> Self {
        Self {
            source,
            parser,
            cache,
        }
    }

    pub async fn load(&self, req: &FetchRequest) -> Result<Arc<PriceSeries>, LoadError> {
        if let Some(series) = self.cache.lock().await.get(req, Utc::now()) {
            debug!("{}: cache hit ({} points)", req.symbol, series.len());
            return Ok(series);
        }

        info!("{}: fetching {} to {}", req.symbol, req.start, req.end);
        let body = self.source.fetch(req).await?;
        let series = Arc::new(self.parser.parse(&req.symbol, &body)?);

        self.cache
            .lock()
            .await
            .insert(req.clone(), series.clone(), Utc::now());
        Ok(series)
    }
}
