use crate::{
    client::DatabaseClient,
    error::{ConnectorError, DbError},
    influx::{response, settings::InfluxSettings},
};
use async_trait::async_trait;
use model::records::row::RowData;
use serde_json::json;
use std::{path::Path, time::Duration};
use tracing::{error, info};

/// HTTP client for the InfluxDB 2.x query API.
///
/// Holds no session state beyond the underlying connection pool; every
/// query is an independent round-trip.
#[derive(Debug, Clone)]
pub struct InfluxClient {
    http: reqwest::Client,
    settings: InfluxSettings,
}

impl InfluxClient {
    pub fn new(settings: InfluxSettings) -> Result<Self, ConnectorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(InfluxClient { http, settings })
    }

    /// Builds a client from a TOML settings file and verifies connectivity
    /// before handing it out.
    pub async fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let settings = InfluxSettings::from_file(path)?;
        let client = InfluxClient::new(settings)?;

        if client.ping().await? {
            info!(
                "Connected to InfluxDB at url:{}, org:{}",
                client.settings.url, client.settings.org
            );
            Ok(client)
        } else {
            error!("Could not connect to InfluxDB at {}", client.settings.url);
            Err(ConnectorError::Unreachable(client.settings.url.clone()))
        }
    }

    pub fn settings(&self) -> &InfluxSettings {
        &self.settings
    }

    fn query_url(&self) -> String {
        format!(
            "{}/api/v2/query?org={}",
            self.settings.base_url(),
            self.settings.org
        )
    }
}

#[async_trait]
impl DatabaseClient for InfluxClient {
    async fn ping(&self) -> Result<bool, DbError> {
        let url = format!("{}/ping", self.settings.base_url());
        let response = self.http.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    async fn query_rows(&self, query: &str) -> Result<Vec<RowData>, DbError> {
        let body = json!({
            "query": query,
            "type": "flux",
            "dialect": {
                "header": true,
                "annotations": ["datatype", "group", "default"],
            },
        });

        let response = self
            .http
            .post(self.query_url())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", self.settings.token),
            )
            .header(reqwest::header::ACCEPT, "application/csv")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // The backend reports query problems in the body; pass its
            // message through unmodified.
            return Err(DbError::Query {
                status: status.as_u16(),
                message: text,
            });
        }

        response::decode_annotated_csv(&text)
    }
}
