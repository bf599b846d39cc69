use std::borrow::Cow;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::entities::drug::MolecularData;
use crate::error::RepurposerError;
use crate::utils::query::encode_path_segment;

const PUBCHEM_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
const PUBCHEM_API: &str = "pubchem";
const PUBCHEM_BASE_ENV: &str = "REPURPOSER_PUBCHEM_BASE";

const PROPERTY_FIELDS: &str = "MolecularFormula,MolecularWeight,CanonicalSMILES";

#[derive(Clone)]
pub(crate) struct PubChemClient {
    client: reqwest_middleware::ClientWithMiddleware,
    base: Cow<'static, str>,
}

impl PubChemClient {
    pub(crate) fn new() -> Result<Self, RepurposerError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: crate::sources::env_base(PUBCHEM_BASE, PUBCHEM_BASE_ENV),
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
        let bytes = crate::sources::read_limited_body(resp, PUBCHEM_API).await?;
        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(RepurposerError::Api {
                api: PUBCHEM_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }
        crate::sources::ensure_json_content_type(PUBCHEM_API, content_type.as_ref(), &bytes)?;
        serde_json::from_slice(&bytes).map_err(|source| RepurposerError::ApiJson {
            api: PUBCHEM_API.to_string(),
            source,
        })
    }

    /// Looks up molecular properties for a compound by name via PUG REST.
    pub(crate) async fn compound_properties(
        &self,
        drug_name: &str,
    ) -> Result<MolecularData, RepurposerError> {
        let drug_name = drug_name.trim();
        if drug_name.is_empty() {
            return Err(RepurposerError::InvalidArgument(
                "drug name is required".into(),
            ));
        }

        let encoded = encode_path_segment(drug_name);
        let url = self.endpoint(&format!(
            "compound/name/{encoded}/property/{PROPERTY_FIELDS}/JSON"
        ));
        let resp: PropertyTableResponse = self.get_json(self.client.get(&url)).await?;

        let props = resp
            .property_table
            .properties
            .into_iter()
            .next()
            .ok_or_else(|| RepurposerError::Api {
                api: PUBCHEM_API.to_string(),
                message: format!("No properties returned for '{drug_name}'"),
            })?;

        Ok(MolecularData {
            molecular_formula: props.molecular_formula.unwrap_or_else(|| "N/A".to_string()),
            molecular_weight: props.molecular_weight.unwrap_or_else(|| "N/A".to_string()),
            canonical_smiles: props.canonical_smiles.unwrap_or_else(|| "N/A".to_string()),
            image_url: crate::mock::molecular_image_url(drug_name),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PropertyTableResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties", default)]
    properties: Vec<CompoundProperties>,
}

/// PubChem reports MolecularWeight as a string in recent PUG REST
/// revisions and as a number in older ones; accept both.
#[derive(Debug, Deserialize)]
struct CompoundProperties {
    #[serde(rename = "MolecularFormula")]
    molecular_formula: Option<String>,
    #[serde(rename = "MolecularWeight", deserialize_with = "de_stringish", default)]
    molecular_weight: Option<String>,
    #[serde(rename = "CanonicalSMILES")]
    canonical_smiles: Option<String>,
}

fn de_stringish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
