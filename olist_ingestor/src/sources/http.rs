use async_trait::async_trait;
use reqwest::Client;
use snafu::{ResultExt, ensure};

use crate::sources::{ClientBuildSnafu, DataSource, RequestSnafu, SourceError, StatusSnafu};

/// Plain unauthenticated HTTP(S) GET source.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("olist-ingest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientBuildSnafu)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        tracing::debug!(url, "requesting dataset");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context(RequestSnafu { url })?;

        let status = response.status();
        ensure!(
            status.is_success(),
            StatusSnafu {
                url,
                status: status.as_u16()
            }
        );

        let body = response.bytes().await.context(RequestSnafu { url })?;
        tracing::debug!(url, bytes = body.len(), "dataset downloaded");
        Ok(body.to_vec())
    }
}
