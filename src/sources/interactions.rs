use serde::Deserialize;

use crate::entities::drug::Interaction;
use crate::error::RepurposerError;

const INTERACTIONS_API: &str = "interactions";
const INTERACTIONS_BASE_ENV: &str = "REPURPOSER_INTERACTIONS_BASE";

/// Drug-drug interaction lookup.
///
/// There is no open registration-free interaction API (DrugCentral needs
/// an account), so by default this serves the curated table. A base URL
/// can be supplied via `REPURPOSER_INTERACTIONS_BASE` for deployments
/// that do have an endpoint; responses are expected as a JSON array of
/// `{drug, severity, description}` records.
#[derive(Clone)]
pub(crate) struct InteractionsClient {
    client: reqwest_middleware::ClientWithMiddleware,
    base: Option<String>,
}

impl InteractionsClient {
    pub(crate) fn new() -> Result<Self, RepurposerError> {
        let base = std::env::var(INTERACTIONS_BASE_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(Self {
            client: crate::sources::shared_client()?,
            base,
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(base: Option<String>) -> Result<Self, RepurposerError> {
        Ok(Self {
            client: crate::sources::test_client()?,
            base,
        })
    }

    pub(crate) async fn interactions(
        &self,
        drug_name: &str,
    ) -> Result<Vec<Interaction>, RepurposerError> {
        let drug_name = drug_name.trim();
        if drug_name.is_empty() {
            return Err(RepurposerError::InvalidArgument(
                "drug name is required".into(),
            ));
        }

        let Some(base) = self.base.as_deref() else {
            return Ok(crate::mock::interactions_for(drug_name));
        };

        let url = format!("{}/interactions", base.trim_end_matches('/'));
        let resp = self
            .client
            .get(&url)
            .query(&[("drug", drug_name)])
            .send()
            .await?;
        let status = resp.status();
        let bytes = crate::sources::read_limited_body(resp, INTERACTIONS_API).await?;
        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(RepurposerError::Api {
                api: INTERACTIONS_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }

        let rows: Vec<InteractionRecord> =
            serde_json::from_slice(&bytes).map_err(|source| RepurposerError::ApiJson {
                api: INTERACTIONS_API.to_string(),
                source,
            })?;

        Ok(rows
            .into_iter()
            .map(|row| Interaction {
                drug: row.drug,
                severity: row.severity.unwrap_or_else(|| "Unknown".to_string()),
                description: row.description.unwrap_or_default(),
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct InteractionRecord {
    drug: String,
    severity: Option<String>,
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn interactions_without_endpoint_serve_curated_table() {
        let client = InteractionsClient::new_for_test(None).unwrap();
        let out = client.interactions("Aspirin").await.unwrap();
        assert_eq!(out[0].drug, "Warfarin");
    }

    #[tokio::test]
    async fn interactions_query_configured_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/interactions"))
            .and(query_param("drug", "Metformin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "drug": "Cimetidine",
                    "severity": "Moderate",
                    "description": "Increased metformin levels"
                },
                { "drug": "Contrast agents" }
            ])))
            .mount(&server)
            .await;

        let client = InteractionsClient::new_for_test(Some(server.uri())).unwrap();
        let out = client.interactions("Metformin").await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].drug, "Cimetidine");
        assert_eq!(out[1].severity, "Unknown");
    }

    #[tokio::test]
    async fn interactions_surface_http_error_context() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/interactions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = InteractionsClient::new_for_test(Some(server.uri())).unwrap();
        let err = client.interactions("Metformin").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("interactions"));
        assert!(msg.contains("503"));
    }

    #[tokio::test]
    async fn interactions_reject_empty_name() {
        let client = InteractionsClient::new_for_test(None).unwrap();
        let err = client.interactions("  ").await.unwrap_err();
        assert!(matches!(err, RepurposerError::InvalidArgument(_)));
    }
}
