use serde::{Deserialize, Serialize};

/// The aggregated repurposing view for one drug: everything the results
/// page, the JSON API, and the PDF report render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugProfile {
    pub name: String,
    pub confidence: u8,
    pub indication: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular: Option<MolecularData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<TrialSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MolecularData {
    pub molecular_formula: String,
    pub molecular_weight: String,
    pub canonical_smiles: String,
    pub image_url: String,
}

impl MolecularData {
    /// SMILES fields from fallbacks carry "N/A"; scoring must not treat
    /// that as a parseable structure.
    pub fn usable_smiles(&self) -> Option<&str> {
        let smiles = self.canonical_smiles.trim();
        if smiles.is_empty() || smiles.eq_ignore_ascii_case("n/a") {
            None
        } else {
            Some(smiles)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialSet {
    pub count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trials: Vec<Trial>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trial {
    pub nct_id: String,
    pub title: String,
    pub phase: String,
    pub status: String,
    pub start_date: String,
    pub completion_date: String,
    pub sponsor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub drug: String,
    pub severity: String,
    pub description: String,
}
