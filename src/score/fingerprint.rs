//! Structure fingerprints over canonical SMILES.
//!
//! Stand-in for Morgan/ECFP fingerprints: the SMILES string is tokenized
//! into atom and bond symbols, and every window of 1..=4 consecutive
//! tokens is hashed into a feature set. Similar structures share local
//! token neighborhoods, so the Tanimoto coefficient over the feature sets
//! tracks gross structural similarity. Deterministic across processes.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

const MAX_WINDOW: usize = 4;

/// Splits a SMILES string into chemically meaningful tokens: bracket
/// atoms as one token, two-letter organic-subset elements (Cl, Br)
/// joined, everything else char-by-char.
fn tokenize(smiles: &str) -> Vec<String> {
    let chars: Vec<char> = smiles.trim().chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '[' {
            let mut atom = String::from(c);
            i += 1;
            while i < chars.len() {
                atom.push(chars[i]);
                if chars[i] == ']' {
                    break;
                }
                i += 1;
            }
            tokens.push(atom);
        } else if (c == 'C' && chars.get(i + 1) == Some(&'l'))
            || (c == 'B' && chars.get(i + 1) == Some(&'r'))
        {
            tokens.push(format!("{}{}", c, chars[i + 1]));
            i += 1;
        } else if !c.is_whitespace() {
            tokens.push(c.to_string());
        }
        i += 1;
    }
    tokens
}

fn feature_hash(window: &[String]) -> u64 {
    // DefaultHasher::new() uses fixed keys, so features are stable.
    let mut hasher = DefaultHasher::new();
    window.len().hash(&mut hasher);
    for token in window {
        token.hash(&mut hasher);
    }
    hasher.finish()
}

pub(crate) fn fingerprint(smiles: &str) -> HashSet<u64> {
    let tokens = tokenize(smiles);
    let mut features = HashSet::new();
    for width in 1..=MAX_WINDOW.min(tokens.len().max(1)) {
        for window in tokens.windows(width) {
            features.insert(feature_hash(window));
        }
    }
    features
}

pub(crate) fn tanimoto(a: &HashSet<u64>, b: &HashSet<u64>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Tanimoto similarity between two SMILES strings, in 0.0..=1.0.
pub(crate) fn smiles_similarity(smiles_a: &str, smiles_b: &str) -> f64 {
    tanimoto(&fingerprint(smiles_a), &fingerprint(smiles_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPIRIN: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";
    const SALICYLIC_ACID: &str = "C1=CC=C(C(=C1)C(=O)O)O";
    const CAFFEINE: &str = "CN1C=NC2=C1C(=O)N(C(=O)N2C)C";

    #[test]
    fn tokenize_handles_bracket_atoms_and_two_letter_elements() {
        let tokens = tokenize("C[N+](Cl)Br");
        assert_eq!(tokens, vec!["C", "[N+]", "(", "Cl", ")", "Br"]);
    }

    #[test]
    fn identical_smiles_score_one() {
        assert_eq!(smiles_similarity(ASPIRIN, ASPIRIN), 1.0);
    }

    #[test]
    fn related_structures_score_higher_than_unrelated() {
        let related = smiles_similarity(ASPIRIN, SALICYLIC_ACID);
        let unrelated = smiles_similarity(ASPIRIN, CAFFEINE);
        assert!(related > unrelated);
        assert!(related > 0.0 && related < 1.0);
    }

    #[test]
    fn empty_inputs_score_zero_without_nan() {
        assert_eq!(smiles_similarity("", ""), 0.0);
        assert_eq!(smiles_similarity(ASPIRIN, ""), 0.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        assert_eq!(
            smiles_similarity(ASPIRIN, CAFFEINE),
            smiles_similarity(CAFFEINE, ASPIRIN)
        );
    }
}
