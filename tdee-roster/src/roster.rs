use chrono::{DateTime, Utc};
use log::{debug, info};
use tdee_model::Patient;

use crate::{Error, PatientId, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub id: PatientId,
    pub registered_at: DateTime<Utc>,
    pub patient: Patient,
}

#[mockall::automock]
pub trait PatientRepository {
    fn register(&mut self, patient: Patient) -> PatientId;
    fn get(&self, id: PatientId) -> Option<RosterEntry>;
    fn update(&mut self, id: PatientId, patient: Patient) -> Result<()>;
    fn remove(&mut self, id: PatientId) -> Result<RosterEntry>;
    fn list(&self) -> Vec<RosterEntry>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Patients registered during this session, in registration order.
#[derive(Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: PatientId) -> Result<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(Error::NotFound(id))
    }
}

impl PatientRepository for Roster {
    fn register(&mut self, patient: Patient) -> PatientId {
        let id = PatientId::new();
        self.entries.push(RosterEntry {
            id,
            registered_at: Utc::now(),
            patient,
        });
        info!("Registered patient {}, roster size {}", id, self.entries.len());
        id
    }

    fn get(&self, id: PatientId) -> Option<RosterEntry> {
        self.entries.iter().find(|entry| entry.id == id).cloned()
    }

    fn update(&mut self, id: PatientId, patient: Patient) -> Result<()> {
        let position = self.position(id)?;
        let entry = &mut self.entries[position];
        debug!(
            "Updating patient {}, changed fields: {:?}",
            id,
            entry.patient.changed_fields(&patient)
        );
        entry.patient = patient;
        Ok(())
    }

    fn remove(&mut self, id: PatientId) -> Result<RosterEntry> {
        let position = self.position(id)?;
        let entry = self.entries.remove(position);
        info!("Removed patient {}, roster size {}", id, self.entries.len());
        Ok(entry)
    }

    fn list(&self) -> Vec<RosterEntry> {
        self.entries.clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use tdee_model::{ActivityLevel, Sex};

    use super::*;

    fn patient(name: &str, weight: f64) -> Patient {
        Patient::new(
            name,
            "Torres",
            35,
            weight,
            170.0,
            Sex::Male,
            ActivityLevel::Light,
        )
        .unwrap()
    }

    #[test]
    fn keeps_registration_order() {
        let mut roster = Roster::new();
        assert!(roster.is_empty());

        let first = roster.register(patient("Pedro", 70.0));
        let second = roster.register(patient("Pablo", 80.0));
        let third = roster.register(patient("Paula", 60.0));

        assert_eq!(
            roster.list().iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![first, second, third]
        );
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut roster = Roster::new();
        let first = roster.register(patient("Pedro", 70.0));
        let second = roster.register(patient("Pablo", 80.0));
        let registered_at = roster.get(first).unwrap().registered_at;

        roster.update(first, patient("Pedro", 95.0)).unwrap();

        let entries = roster.list();
        assert_eq!(entries[0].id, first);
        assert_eq!(entries[0].registered_at, registered_at);
        assert_eq!(entries[0].patient.weight_kg(), 95.0);
        assert_eq!(entries[1].id, second);
    }

    #[test]
    fn remove_returns_entry() {
        let mut roster = Roster::new();
        let first = roster.register(patient("Pedro", 70.0));
        let second = roster.register(patient("Pablo", 80.0));

        let removed = roster.remove(first).unwrap();

        assert_eq!(removed.patient.name(), "Pedro");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.list()[0].id, second);
        assert_eq!(roster.get(first), None);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut roster = Roster::new();
        roster.register(patient("Pedro", 70.0));
        let unknown = PatientId::new();

        assert_eq!(roster.remove(unknown), Err(Error::NotFound(unknown)));
        assert_eq!(
            roster.update(unknown, patient("Pablo", 80.0)),
            Err(Error::NotFound(unknown))
        );
        assert_eq!(roster.len(), 1);
    }
}
