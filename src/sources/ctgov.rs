use std::borrow::Cow;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::RepurposerError;

const CTGOV_BASE: &str = "https://clinicaltrials.gov/api/v2";
const CTGOV_API: &str = "ctgov";
const CTGOV_BASE_ENV: &str = "REPURPOSER_CTGOV_BASE";

#[derive(Clone)]
pub(crate) struct CtGovClient {
    client: reqwest_middleware::ClientWithMiddleware,
    base: Cow<'static, str>,
}

impl CtGovClient {
    pub(crate) fn new() -> Result<Self, RepurposerError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: crate::sources::env_base(CTGOV_BASE, CTGOV_BASE_ENV),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(base: String) -> Result<Self, RepurposerError> {
        Ok(Self {
            client: crate::sources::test_client()?,
            base: Cow::Owned(base),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        req: reqwest_middleware::RequestBuilder,
    ) -> Result<T, RepurposerError> {
        let resp = req.send().await?;
        let status = resp.status();
        let content_type = resp.headers().get(reqwest::header::CONTENT_TYPE).cloned();
        let bytes = crate::sources::read_limited_body(resp, CTGOV_API).await?;
        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(RepurposerError::Api {
                api: CTGOV_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }
        crate::sources::ensure_json_content_type(CTGOV_API, content_type.as_ref(), &bytes)?;
        serde_json::from_slice(&bytes).map_err(|source| RepurposerError::ApiJson {
            api: CTGOV_API.to_string(),
            source,
        })
    }

    /// Searches ClinicalTrials.gov v2 studies by free-text term,
    /// relevance-sorted.
    pub(crate) async fn search_studies(
        &self,
        term: &str,
        page_size: usize,
    ) -> Result<Vec<CtGovStudy>, RepurposerError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(RepurposerError::InvalidArgument(
                "search term is required".into(),
            ));
        }

        let url = self.endpoint("studies");
        let page_size = page_size.clamp(1, 100).to_string();
        let resp: CtGovSearchResponse = self
            .get_json(self.client.get(&url).query(&[
                ("query.term", term),
                ("pageSize", page_size.as_str()),
                ("sort", "Relevance"),
            ]))
            .await?;

        Ok(resp.studies)
    }
}

#[derive(Debug, Deserialize)]
struct CtGovSearchResponse {
    #[serde(default)]
    studies: Vec<CtGovStudy>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CtGovStudy {
    #[serde(rename = "protocolSection", default)]
    pub protocol_section: CtGovProtocolSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CtGovProtocolSection {
    #[serde(rename = "identificationModule", default)]
    pub identification: CtGovIdentificationModule,
    #[serde(rename = "statusModule", default)]
    pub status: CtGovStatusModule,
    #[serde(rename = "designModule", default)]
    pub design: CtGovDesignModule,
    #[serde(rename = "sponsorCollaboratorsModule", default)]
    pub sponsor: CtGovSponsorModule,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CtGovIdentificationModule {
    #[serde(rename = "nctId")]
    pub nct_id: Option<String>,
    #[serde(rename = "briefTitle")]
    pub brief_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CtGovStatusModule {
    #[serde(rename = "overallStatus")]
    pub overall_status: Option<String>,
    #[serde(rename = "startDateStruct")]
    pub start_date: Option<CtGovDateStruct>,
    #[serde(rename = "completionDateStruct")]
    pub completion_date: Option<CtGovDateStruct>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CtGovDesignModule {
    #[serde(default)]
    pub phases: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CtGovDateStruct {
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CtGovSponsorModule {
    #[serde(rename = "leadSponsor")]
    pub lead_sponsor: Option<CtGovLeadSponsor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CtGovLeadSponsor {
    pub name: Option<String>,
}
