use std::sync::OnceLock;

use minijinja::{Environment, context};

use crate::cache::CacheStats;
use crate::entities::drug::DrugProfile;
use crate::error::RepurposerError;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn env() -> Result<&'static Environment<'static>, RepurposerError> {
    if let Some(env) = ENV.get() {
        return Ok(env);
    }

    let mut env = Environment::new();
    env.add_filter("confidence_class", |score: u64| -> String {
        if score >= 80 {
            "high".to_string()
        } else if score >= 60 {
            "medium".to_string()
        } else {
            "low".to_string()
        }
    });
    env.add_filter("truncate", |s: String, max_bytes: usize| -> String {
        if s.len() <= max_bytes {
            return s;
        }
        if max_bytes == 0 {
            return "…".to_string();
        }
        let mut boundary = max_bytes;
        while boundary > 0 && !s.is_char_boundary(boundary) {
            boundary -= 1;
        }
        let mut out = s[..boundary].trim_end().to_string();
        out.push('…');
        out
    });
    env.add_template("index.html.j2", include_str!("../../templates/index.html.j2"))?;
    env.add_template(
        "results.html.j2",
        include_str!("../../templates/results.html.j2"),
    )?;
    env.add_template(
        "compare.html.j2",
        include_str!("../../templates/compare.html.j2"),
    )?;

    let _ = ENV.set(env);
    ENV.get().ok_or_else(|| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "template environment initialization race",
        )
        .into()
    })
}

pub(crate) fn index_page(stats: &CacheStats) -> Result<String, RepurposerError> {
    let tmpl = env()?.get_template("index.html.j2")?;
    Ok(tmpl.render(context! {
        cache_stats => stats,
        suggestions => crate::mock::KNOWN_DRUGS,
        version => env!("CARGO_PKG_VERSION"),
    })?)
}

pub(crate) fn results_page(
    query: &str,
    drugs: &[DrugProfile],
    last_updated: &str,
) -> Result<String, RepurposerError> {
    let tmpl = env()?.get_template("results.html.j2")?;
    Ok(tmpl.render(context! {
        query => query,
        drugs => drugs,
        last_updated => last_updated,
    })?)
}

pub(crate) fn compare_page(
    drugs: &[DrugProfile],
    last_updated: &str,
) -> Result<String, RepurposerError> {
    let tmpl = env()?.get_template("compare.html.j2")?;
    Ok(tmpl.render(context! {
        drugs => drugs,
        last_updated => last_updated,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::drug::{Interaction, MolecularData, Trial, TrialSet};

    fn sample_profile(name: &str, confidence: u8) -> DrugProfile {
        DrugProfile {
            name: name.to_string(),
            confidence,
            indication: "New therapeutic use".to_string(),
            molecular: Some(MolecularData {
                molecular_formula: "C9H8O4".to_string(),
                molecular_weight: "180.16".to_string(),
                canonical_smiles: "CC(=O)OC1=CC=CC=C1C(=O)O".to_string(),
                image_url: "https://example.org/aspirin.png".to_string(),
            }),
            trials: Some(TrialSet {
                count: 1,
                trials: vec![Trial {
                    nct_id: "NCT00000001".to_string(),
                    title: "Aspirin and Cancer Prevention".to_string(),
                    phase: "PHASE3".to_string(),
                    status: "RECRUITING".to_string(),
                    start_date: "2023-04-01".to_string(),
                    completion_date: "2026-01-01".to_string(),
                    sponsor: "Example University".to_string(),
                }],
            }),
            interactions: vec![Interaction {
                drug: "Warfarin".to_string(),
                severity: "High".to_string(),
                description: "Increased bleeding risk".to_string(),
            }],
        }
    }

    #[test]
    fn index_page_shows_stats_and_suggestions() {
        let html = index_page(&CacheStats { hits: 3, misses: 7 }).unwrap();
        assert!(html.contains("Drug Repurposing"));
        assert!(html.contains("Metformin"));
        assert!(html.contains('3'));
        assert!(html.contains('7'));
    }

    #[test]
    fn results_page_renders_profile_sections() {
        let html = results_page(
            "Aspirin",
            &[sample_profile("Aspirin", 82)],
            "2026-08-26T00:00:00Z",
        )
        .unwrap();
        assert!(html.contains("Aspirin"));
        assert!(html.contains("82"));
        assert!(html.contains("C9H8O4"));
        assert!(html.contains("NCT00000001"));
        assert!(html.contains("Warfarin"));
        assert!(html.contains("confidence-high"));
    }

    #[test]
    fn results_page_handles_empty_query() {
        let html = results_page("", &[], "2026-08-26T00:00:00Z").unwrap();
        assert!(html.contains("No results"));
    }

    #[test]
    fn compare_page_renders_all_drugs() {
        let html = compare_page(
            &[sample_profile("Aspirin", 82), sample_profile("Metformin", 58)],
            "2026-08-26T00:00:00Z",
        )
        .unwrap();
        assert!(html.contains("Aspirin"));
        assert!(html.contains("Metformin"));
        assert!(html.contains("confidence-low"));
        assert!(html.contains("Warfarin: High"));
    }
}
