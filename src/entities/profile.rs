use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheStats, Caches};
use crate::entities::drug::{DrugProfile, Interaction, MolecularData, TrialSet};
use crate::error::RepurposerError;
use crate::score;
use crate::sources::ctgov::CtGovClient;
use crate::sources::interactions::InteractionsClient;
use crate::sources::pubchem::PubChemClient;
use crate::transform;

/// Indication shown for repurposing candidates; the proposed use is the
/// query itself, not an approved label.
pub(crate) const NOVEL_USE: &str = "New therapeutic use";

const TRIALS_PAGE_SIZE: usize = 5;
const WARM_DRUGS: &[&str] = &["Metformin", "Aspirin", "Sildenafil"];

/// Assembles aggregated drug profiles: each component goes through its
/// timed-cache store and degrades to mock data when its upstream fails.
#[derive(Clone)]
pub(crate) struct ProfileService {
    caches: Arc<Caches>,
    pubchem: PubChemClient,
    ctgov: CtGovClient,
    interactions: InteractionsClient,
}

impl ProfileService {
    pub(crate) fn new() -> Result<Self, RepurposerError> {
        Ok(Self {
            caches: Arc::new(Caches::new()),
            pubchem: PubChemClient::new()?,
            ctgov: CtGovClient::new()?,
            interactions: InteractionsClient::new()?,
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(
        pubchem_base: String,
        ctgov_base: String,
        interactions_base: Option<String>,
    ) -> Result<Self, RepurposerError> {
        Ok(Self {
            caches: Arc::new(Caches::new()),
            pubchem: PubChemClient::new_for_test(pubchem_base)?,
            ctgov: CtGovClient::new_for_test(ctgov_base)?,
            interactions: InteractionsClient::new_for_test(interactions_base)?,
        })
    }

    pub(crate) fn cache_stats(&self) -> CacheStats {
        self.caches.stats()
    }

    pub(crate) fn clear_caches(&self) {
        self.caches.clear_all();
    }

    /// Full aggregated view for one drug. Never fails: every component
    /// has a mock fallback.
    pub(crate) async fn lookup(&self, drug_name: &str) -> DrugProfile {
        let drug_name = drug_name.trim();
        if let Some(profile) = self.caches.profiles.get(drug_name) {
            return profile;
        }

        let molecular = self.molecular(drug_name).await;
        let confidence = self.confidence(drug_name, &molecular).await;
        let trials = self.trials(drug_name).await;
        let interactions = self.drug_interactions(drug_name).await;

        let profile = DrugProfile {
            name: drug_name.to_string(),
            confidence,
            indication: NOVEL_USE.to_string(),
            molecular: Some(molecular),
            trials: Some(trials),
            interactions,
        };
        self.caches.profiles.insert(drug_name, profile.clone());
        profile
    }

    /// Confidence only, for the lightweight JSON search endpoint.
    pub(crate) async fn confidence_for(&self, drug_name: &str) -> u8 {
        let drug_name = drug_name.trim();
        if let Some(score) = self.caches.confidence.get(drug_name) {
            return score;
        }
        let molecular = self.molecular(drug_name).await;
        self.confidence(drug_name, &molecular).await
    }

    async fn molecular(&self, drug_name: &str) -> MolecularData {
        if let Some(data) = self.caches.molecular.get(drug_name) {
            return data;
        }
        let data = match self.pubchem.compound_properties(drug_name).await {
            Ok(data) => data,
            Err(err) => {
                warn!(drug = drug_name, error = %err, "PubChem lookup failed, using mock molecular data");
                crate::mock::molecular(drug_name)
            }
        };
        self.caches.molecular.insert(drug_name, data.clone());
        data
    }

    async fn confidence(&self, drug_name: &str, molecular: &MolecularData) -> u8 {
        if let Some(score) = self.caches.confidence.get(drug_name) {
            return score;
        }

        let score = match molecular.usable_smiles() {
            Some(target_smiles) => {
                let reference = self.molecular(score::REFERENCE_DRUG).await;
                let reference_smiles = reference
                    .usable_smiles()
                    .unwrap_or(score::REFERENCE_SMILES)
                    .to_string();
                score::confidence(drug_name, target_smiles, &reference_smiles)
            }
            None => {
                debug!(
                    drug = drug_name,
                    "no usable SMILES, using fallback confidence score"
                );
                score::fallback_score(drug_name)
            }
        };

        self.caches.confidence.insert(drug_name, score);
        score
    }

    async fn trials(&self, drug_name: &str) -> TrialSet {
        if let Some(set) = self.caches.trials.get(drug_name) {
            return set;
        }
        let set = match self.ctgov.search_studies(drug_name, TRIALS_PAGE_SIZE).await {
            Ok(studies) => transform::trial::trial_set(&studies),
            Err(err) => {
                warn!(drug = drug_name, error = %err, "ClinicalTrials.gov lookup failed, using mock trials");
                crate::mock::trials(drug_name)
            }
        };
        self.caches.trials.insert(drug_name, set.clone());
        set
    }

    async fn drug_interactions(&self, drug_name: &str) -> Vec<Interaction> {
        if let Some(list) = self.caches.interactions.get(drug_name) {
            return list;
        }
        let list = match self.interactions.interactions(drug_name).await {
            Ok(list) => list,
            Err(err) => {
                warn!(drug = drug_name, error = %err, "interaction lookup failed, using mock interactions");
                crate::mock::interactions_for(drug_name)
            }
        };
        self.caches.interactions.insert(drug_name, list.clone());
        list
    }

    /// Pre-populates caches for common lookups; failures only mean the
    /// first real request pays the upstream latency.
    pub(crate) async fn warm(&self) {
        for drug in WARM_DRUGS {
            let profile = self.lookup(drug).await;
            debug!(drug, confidence = profile.confidence, "warmed cache");
        }
    }
}
