use crate::model::{FetchError, FetchRequest};

/// Remote provider of raw daily price history.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, req: &FetchRequest) -> Result<String, FetchError>;
}
