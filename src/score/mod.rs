//! Repurposing confidence scoring.
//!
//! The score compares the queried drug against a fixed reference drug
//! with a known repurposing success story (Sildenafil): a structure
//! similarity over canonical SMILES, a text overlap over approved
//! indications, and a base component, combined with fixed weights into a
//! 0-100 percentage.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::seed::name_seed;

pub(crate) mod fingerprint;

pub(crate) const REFERENCE_DRUG: &str = "Sildenafil";
/// Canonical SMILES for the reference drug, used when the live lookup
/// for the reference itself fails.
pub(crate) const REFERENCE_SMILES: &str =
    "CCCC1=NN(C)C2=C1NC(=NC2=O)C1=CC(=CC=C1OCC)S(=O)(=O)N1CCN(C)CC1";

const STRUCTURE_WEIGHT: f64 = 0.6;
const TEXT_WEIGHT: f64 = 0.3;
const BASE_WEIGHT: f64 = 0.1;

fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard index over lowercased whitespace tokens, in 0.0..=1.0.
pub(crate) fn text_similarity(text_a: &str, text_b: &str) -> f64 {
    let set_a = token_set(text_a);
    let set_b = token_set(text_b);
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Fixed-weight combination of the two similarity measures, clamped to
/// an integer percentage.
pub(crate) fn combine(structure_similarity: f64, text_sim: f64) -> u8 {
    let combined =
        structure_similarity * STRUCTURE_WEIGHT + text_sim * TEXT_WEIGHT + BASE_WEIGHT;
    (combined * 100.0).clamp(0.0, 100.0) as u8
}

/// Score for drugs whose molecular data is unavailable: stable
/// pseudo-random 40..=60, seeded from the drug name.
pub(crate) fn fallback_score(drug_name: &str) -> u8 {
    let mut rng = StdRng::seed_from_u64(name_seed(drug_name).wrapping_add(1));
    rng.gen_range(40..=60)
}

/// Full scoring pipeline given both compounds' inputs.
pub(crate) fn confidence(
    drug_name: &str,
    target_smiles: &str,
    reference_smiles: &str,
) -> u8 {
    let structure_similarity = fingerprint::smiles_similarity(target_smiles, reference_smiles);
    let text_sim = text_similarity(
        &crate::mock::indication_text(drug_name),
        &crate::mock::indication_text(REFERENCE_DRUG),
    );
    let score = combine(structure_similarity, text_sim);
    tracing::debug!(
        drug = drug_name,
        structure_similarity,
        text_similarity = text_sim,
        score,
        "computed confidence score"
    );
    score
}
