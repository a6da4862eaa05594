use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;
use tdee_model::{Metrics, PatientForm};
use tdee_roster::PatientRepository;

/// What happened to one form of a batch.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Registered {
        id: String,
        full_name: String,
        basic_info: String,
        metrics: Metrics,
        summary: String,
    },
    Rejected {
        form: PatientForm,
        errors: BTreeMap<String, String>,
    },
}

/// Validates every form and registers the valid ones, keeping the input order.
pub fn register_all(
    repository: &mut dyn PatientRepository,
    forms: &[PatientForm],
) -> Vec<Outcome> {
    let outcomes: Vec<_> = forms
        .iter()
        .enumerate()
        .map(|(i, form)| match form.validate() {
            Ok(patient) => {
                let full_name = patient.full_name();
                let basic_info = patient.basic_info();
                let metrics = patient.metrics();
                let id = repository.register(patient);
                debug!("Form #{} registered as {}", i, id);
                Outcome::Registered {
                    id: id.to_string(),
                    full_name,
                    basic_info,
                    metrics,
                    summary: metrics.to_string(),
                }
            }
            Err(errors) => {
                debug!("Form #{} rejected: {:?}", i, errors.fields().collect::<Vec<_>>());
                Outcome::Rejected {
                    form: form.clone(),
                    errors: errors
                        .iter()
                        .map(|(field, error)| (field.to_string(), error.to_string()))
                        .collect(),
                }
            }
        })
        .collect();

    let registered = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, Outcome::Registered { .. }))
        .count();
    info!(
        "Registered {} of {} patients from batch",
        registered,
        forms.len()
    );
    outcomes
}
