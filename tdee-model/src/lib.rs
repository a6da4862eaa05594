pub mod form;
pub mod metrics;
pub mod patient;
pub mod validation;

pub use form::PatientForm;
pub use metrics::{BmiClass, BodyFatClass, Metrics};
pub use patient::{ActivityLevel, Patient, Sex};
pub use validation::{Field, ValidationError, ValidationErrors};
