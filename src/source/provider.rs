use async_trait::async_trait;
use crate::error::Result;
use crate::models::FeedbackTable;

#[async_trait]
pub trait TableSource: Send + Sync {
    async fn load(&self) -> Result<FeedbackTable>;
    fn name(&self) -> &str;
}
