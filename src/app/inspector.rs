use crate::app::error::ClientError;
use crate::app::models::TableMetadataResponse;
use crate::app::transport::{HttpTransport, endpoint};
use async_trait::async_trait;
use tracing::info;
use url::Url;

// Anything that can produce a metadata scan for a table name.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_metadata(&self, table_name: &str) -> Result<TableMetadataResponse, ClientError>;
}

/// Client for the metadata-scan service. Every call is a fresh scan: no retry,
/// no caching.
pub struct Inspector {
    transport: HttpTransport,
    base_url: Url,
}

impl Inspector {
    pub fn new(transport: HttpTransport, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub async fn scan(&self, table_name: &str) -> Result<TableMetadataResponse, ClientError> {
        let mut url = endpoint(&self.base_url, "metadata")?;
        url.query_pairs_mut().append_pair("table_name", table_name);

        let metadata: TableMetadataResponse = self.transport.get_json(url).await?;

        info!(
            table = table_name,
            central = metadata.central_tables.len(),
            parents = metadata.parent_tables.len(),
            children = metadata.child_tables.len(),
            constraints = metadata.constraints.len(),
            "metadata scan complete"
        );
        Ok(metadata)
    }
}

#[async_trait]
impl MetadataSource for Inspector {
    async fn fetch_metadata(&self, table_name: &str) -> Result<TableMetadataResponse, ClientError> {
        self.scan(table_name).await
    }
}
