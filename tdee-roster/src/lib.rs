pub mod roster;

use std::fmt;

use uuid::Uuid;

pub use roster::{MockPatientRepository, PatientRepository, Roster, RosterEntry};

#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct PatientId(Uuid);

impl PatientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PatientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Debug for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl From<Uuid> for PatientId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("paciente {0} no encontrado")]
    NotFound(PatientId),
}

pub type Result<T> = std::result::Result<T, Error>;
