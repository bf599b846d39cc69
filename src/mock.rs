//! Mock fallback data.
//!
//! Every upstream call has a substitute so a lookup never fails outright:
//! curated tables for well-known drugs, and seeded synthetic records for
//! everything else. Synthetic data is deterministic per drug name.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::drug::{Interaction, MolecularData, Trial, TrialSet};
use crate::utils::seed::name_seed;

#[derive(serde::Serialize)]
pub(crate) struct KnownDrug {
    pub name: &'static str,
    pub confidence: u8,
    pub indication: &'static str,
}

/// Curated repurposing candidates shown as index-page suggestions.
pub(crate) const KNOWN_DRUGS: &[KnownDrug] = &[
    KnownDrug {
        name: "Metformin",
        confidence: 75,
        indication: "Type 2 Diabetes, Potential Cancer Prevention",
    },
    KnownDrug {
        name: "Aspirin",
        confidence: 82,
        indication: "Pain Relief, Cardiovascular Protection, Cancer Prevention",
    },
    KnownDrug {
        name: "Sildenafil",
        confidence: 88,
        indication: "Erectile Dysfunction, Pulmonary Arterial Hypertension",
    },
    KnownDrug {
        name: "Thalidomide",
        confidence: 70,
        indication: "Multiple Myeloma, Erythema Nodosum Leprosum",
    },
    KnownDrug {
        name: "Rapamycin",
        confidence: 78,
        indication: "Immunosuppression, Potential Anti-aging",
    },
    KnownDrug {
        name: "Doxycycline",
        confidence: 65,
        indication: "Antibiotic, Potential Cancer Adjunct",
    },
    KnownDrug {
        name: "Losartan",
        confidence: 72,
        indication: "Hypertension, Cardioprotection",
    },
    KnownDrug {
        name: "Atorvastatin",
        confidence: 68,
        indication: "Cholesterol management",
    },
    KnownDrug {
        name: "Levothyroxine",
        confidence: 60,
        indication: "Hypothyroidism",
    },
    KnownDrug {
        name: "Amlodipine",
        confidence: 75,
        indication: "High blood pressure",
    },
    KnownDrug {
        name: "Simvastatin",
        confidence: 70,
        indication: "Cholesterol",
    },
    KnownDrug {
        name: "Omeprazole",
        confidence: 62,
        indication: "Acid reflux",
    },
    KnownDrug {
        name: "Sertraline",
        confidence: 66,
        indication: "Depression",
    },
];

const INDICATIONS: &[(&str, &str)] = &[
    ("metformin", "Type 2 Diabetes Mellitus"),
    ("aspirin", "Pain, Fever, Inflammation, Cardiovascular"),
    (
        "sildenafil",
        "Erectile Dysfunction, Pulmonary Arterial Hypertension",
    ),
    ("rapamycin", "Immunosuppression, mTOR Inhibition"),
    ("thalidomide", "Multiple Myeloma, Leprosy"),
    ("doxycycline", "Bacterial Infections"),
    ("losartan", "Hypertension, Diabetic Nephropathy"),
    ("atorvastatin", "Hypercholesterolemia, Cardiovascular Risk"),
    ("levothyroxine", "Hypothyroidism"),
    ("amlodipine", "Hypertension, Angina"),
    ("simvastatin", "Hypercholesterolemia"),
    ("omeprazole", "Gastroesophageal Reflux Disease, Peptic Ulcer"),
    ("sertraline", "Depression, Anxiety Disorders"),
];

/// Approved-indication text used as the text-overlap input for scoring.
pub(crate) fn indication_text(drug_name: &str) -> String {
    let key = drug_name.trim().to_lowercase();
    INDICATIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, text)| (*text).to_string())
        .unwrap_or_else(|| format!("Indication for {} (unverified)", drug_name.trim()))
}

/// Curated interaction lists, with a generic two-entry fallback for
/// drugs outside the table.
pub(crate) fn interactions_for(drug_name: &str) -> Vec<Interaction> {
    let curated: &[(&str, &str, &str)] = match drug_name.trim().to_lowercase().as_str() {
        "metformin" => &[
            (
                "Contrast agents",
                "High",
                "Temporary discontinuation recommended",
            ),
            ("Cimetidine", "Moderate", "Increased metformin levels"),
        ],
        "aspirin" => &[
            ("Warfarin", "High", "Increased bleeding risk"),
            ("Ibuprofen", "Moderate", "Reduced aspirin effectiveness"),
        ],
        "sildenafil" => &[
            ("Nitrates", "High", "Severe hypotension"),
            ("Alpha-blockers", "Moderate", "Increased hypotension risk"),
        ],
        _ => &[
            ("Drug A", "Moderate", "Potential interaction"),
            ("Drug B", "Low", "Minor interaction possible"),
        ],
    };

    curated
        .iter()
        .map(|(drug, severity, description)| Interaction {
            drug: (*drug).to_string(),
            severity: (*severity).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

pub(crate) fn molecular_image_url(drug_name: &str) -> String {
    format!(
        "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/{}/PNG",
        crate::utils::query::encode_path_segment(drug_name.trim())
    )
}

/// Fixed stand-in compound record; the depiction URL still points at
/// PubChem so the page can show a structure image when one exists.
pub(crate) fn molecular(drug_name: &str) -> MolecularData {
    MolecularData {
        molecular_formula: "C10H15NO".to_string(),
        molecular_weight: "165.23 g/mol".to_string(),
        canonical_smiles: "N/A".to_string(),
        image_url: molecular_image_url(drug_name),
    }
}

const PHASES: &[&str] = &["Phase 1", "Phase 2", "Phase 3", "Phase 4"];
const STATUSES: &[&str] = &["Recruiting", "Active", "Completed", "Terminated"];

/// Synthetic trial records, seeded by drug name so retries agree.
pub(crate) fn trials(drug_name: &str) -> TrialSet {
    let mut rng = StdRng::seed_from_u64(name_seed(drug_name));
    let count = rng.gen_range(1..=3);
    let trials: Vec<Trial> = (0..count)
        .map(|_| {
            let start_year = rng.gen_range(2020..=2024);
            let completion_year = rng.gen_range(2024..=2026);
            Trial {
                nct_id: format!("NCT{}", rng.gen_range(10_000_000..=99_999_999u32)),
                title: format!("Trial for {}", drug_name.trim()),
                phase: PHASES[rng.gen_range(0..PHASES.len())].to_string(),
                status: STATUSES[rng.gen_range(0..STATUSES.len())].to_string(),
                start_date: format!(
                    "{start_year}-{:02}-{:02}",
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28)
                ),
                completion_date: format!(
                    "{completion_year}-{:02}-{:02}",
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28)
                ),
                sponsor: "Mock Sponsor".to_string(),
            }
        })
        .collect();

    TrialSet {
        count: trials.len(),
        trials,
    }
}
