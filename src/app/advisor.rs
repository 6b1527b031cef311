use crate::app::error::ClientError;
use crate::app::models::{RecommendationResponse, TableMetadataResponse};
use crate::app::transport::{HttpTransport, endpoint};
use async_trait::async_trait;
use tracing::info;
use url::Url;

#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_recommendations(
        &self,
        metadata: &TableMetadataResponse,
    ) -> Result<RecommendationResponse, ClientError>;
}

/// Client for the AI recommendation service. It posts the whole scan and gets
/// back suggested generators per column.
pub struct Advisor {
    transport: HttpTransport,
    base_url: Url,
}

impl Advisor {
    pub fn new(transport: HttpTransport, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub async fn ask(
        &self,
        metadata: &TableMetadataResponse,
    ) -> Result<RecommendationResponse, ClientError> {
        let url = endpoint(&self.base_url, "ask")?;
        let recommendations: RecommendationResponse =
            self.transport.post_json(url, metadata).await?;

        info!(
            entries = recommendations.len(),
            "generator recommendations received"
        );
        Ok(recommendations)
    }
}

#[async_trait]
impl RecommendationSource for Advisor {
    async fn fetch_recommendations(
        &self,
        metadata: &TableMetadataResponse,
    ) -> Result<RecommendationResponse, ClientError> {
        self.ask(metadata).await
    }
}
