use crate::domain::model::TransmissionResult;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::time::Duration;

/// Wall-clock reads. Infallible.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

#[async_trait]
pub trait TransmissionFetcher: Send + Sync + 'static {
    /// Resolves to a transmission, or to [`TransmissionResult::signal_lost`]
    /// when anything goes wrong. Never fails.
    async fn request_transmission(&self, current_time_label: &str) -> TransmissionResult;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn request_timeout(&self) -> Option<Duration>;
}
