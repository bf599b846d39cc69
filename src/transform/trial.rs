use crate::entities::drug::{Trial, TrialSet};
use crate::sources::ctgov::{CtGovDateStruct, CtGovStudy};

const MISSING: &str = "N/A";

fn clean(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn date(value: Option<&CtGovDateStruct>) -> String {
    clean(value.and_then(|d| d.date.as_deref()))
}

fn phase(phases: &[String]) -> String {
    let cleaned: Vec<&str> = phases
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if cleaned.is_empty() {
        MISSING.to_string()
    } else {
        cleaned.join(", ")
    }
}

pub(crate) fn from_ctgov_study(study: &CtGovStudy) -> Trial {
    let protocol = &study.protocol_section;
    Trial {
        nct_id: clean(protocol.identification.nct_id.as_deref()),
        title: clean(protocol.identification.brief_title.as_deref()),
        phase: phase(&protocol.design.phases),
        status: clean(protocol.status.overall_status.as_deref()),
        start_date: date(protocol.status.start_date.as_ref()),
        completion_date: date(protocol.status.completion_date.as_ref()),
        sponsor: clean(
            protocol
                .sponsor
                .lead_sponsor
                .as_ref()
                .and_then(|s| s.name.as_deref()),
        ),
    }
}

pub(crate) fn trial_set(studies: &[CtGovStudy]) -> TrialSet {
    let trials: Vec<Trial> = studies.iter().map(from_ctgov_study).collect();
    TrialSet {
        count: trials.len(),
        trials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ctgov::{
        CtGovDesignModule, CtGovIdentificationModule, CtGovLeadSponsor, CtGovProtocolSection,
        CtGovSponsorModule, CtGovStatusModule,
    };

    fn study() -> CtGovStudy {
        CtGovStudy {
            protocol_section: CtGovProtocolSection {
                identification: CtGovIdentificationModule {
                    nct_id: Some("NCT04510194".to_string()),
                    brief_title: Some("Sildenafil for Heart Failure".to_string()),
                },
                status: CtGovStatusModule {
                    overall_status: Some("COMPLETED".to_string()),
                    start_date: Some(CtGovDateStruct {
                        date: Some("2020-08-01".to_string()),
                    }),
                    completion_date: None,
                },
                design: CtGovDesignModule {
                    phases: vec!["PHASE2".to_string(), "PHASE3".to_string()],
                },
                sponsor: CtGovSponsorModule {
                    lead_sponsor: Some(CtGovLeadSponsor {
                        name: Some("Example Hospital".to_string()),
                    }),
                },
            },
        }
    }

    #[test]
    fn from_ctgov_study_maps_nested_modules() {
        let trial = from_ctgov_study(&study());
        assert_eq!(trial.nct_id, "NCT04510194");
        assert_eq!(trial.title, "Sildenafil for Heart Failure");
        assert_eq!(trial.phase, "PHASE2, PHASE3");
        assert_eq!(trial.status, "COMPLETED");
        assert_eq!(trial.start_date, "2020-08-01");
        assert_eq!(trial.completion_date, "N/A");
        assert_eq!(trial.sponsor, "Example Hospital");
    }

    #[test]
    fn from_ctgov_study_defaults_missing_fields() {
        let trial = from_ctgov_study(&CtGovStudy {
            protocol_section: CtGovProtocolSection::default(),
        });
        assert_eq!(trial.nct_id, "N/A");
        assert_eq!(trial.phase, "N/A");
        assert_eq!(trial.sponsor, "N/A");
    }

    #[test]
    fn trial_set_counts_results() {
        let set = trial_set(&[study(), study()]);
        assert_eq!(set.count, 2);
        assert_eq!(set.trials.len(), 2);
    }
}
