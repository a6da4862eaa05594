use crate::patient::Patient;
use crate::validation::{self, Field, ValidationErrors};

/// Raw values as typed into the patient form.
///
/// `sex` and `activity_level` hold the index selected in the corresponding
/// picker, `None` when nothing is selected.
#[cfg_attr(feature = "serde", serde_with::skip_serializing_none)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub surname: String,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub sex: Option<usize>,
    pub activity_level: Option<usize>,
}

impl PatientForm {
    /// Text input backing `field`, `None` for the picker fields.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Surname => Some(&mut self.surname),
            Field::Age => Some(&mut self.age),
            Field::Weight => Some(&mut self.weight),
            Field::Height => Some(&mut self.height),
            Field::Sex | Field::ActivityLevel => None,
        }
    }

    /// Checks every field and builds the patient, or reports each failing
    /// field with its message.
    pub fn validate(&self) -> Result<Patient, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.check(validation::check_name(&self.name));
        let surname = errors.check(validation::check_surname(&self.surname));
        let age = errors.check(validation::parse_age(&self.age));
        let weight = errors.check(validation::parse_weight(&self.weight));
        let height = errors.check(validation::parse_height(&self.height));
        let sex = errors.check(validation::parse_sex(self.sex));
        let activity_level = errors.check(validation::parse_activity_level(self.activity_level));

        match (name, surname, age, weight, height, sex, activity_level) {
            (
                Some(name),
                Some(surname),
                Some(age),
                Some(weight),
                Some(height),
                Some(sex),
                Some(activity_level),
            ) => Ok(Patient::from_checked(
                name,
                surname,
                age,
                weight,
                height,
                sex,
                activity_level,
            )),
            _ => Err(errors),
        }
    }
}

impl From<&Patient> for PatientForm {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.name().to_owned(),
            surname: patient.surname().to_owned(),
            age: patient.age().to_string(),
            weight: patient.weight_kg().to_string(),
            height: patient.height_cm().to_string(),
            sex: Some(patient.sex().index()),
            activity_level: Some(patient.activity_level().index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{ActivityLevel, Sex};
    use crate::validation::ValidationError;

    fn valid_form() -> PatientForm {
        PatientForm {
            name: "María".to_owned(),
            surname: "López".to_owned(),
            age: "42".to_owned(),
            weight: "68,5".to_owned(),
            height: "162".to_owned(),
            sex: Some(1),
            activity_level: Some(3),
        }
    }

    #[test]
    fn valid_form_builds_patient() {
        let patient = valid_form().validate().unwrap();

        assert_eq!(patient.full_name(), "María López");
        assert_eq!(patient.age(), 42);
        assert_eq!(patient.weight_kg(), 68.5);
        assert_eq!(patient.height_cm(), 162.0);
        assert_eq!(patient.sex(), Sex::Female);
        assert_eq!(patient.activity_level(), ActivityLevel::Intense);
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = PatientForm::default().validate().unwrap_err();

        assert_eq!(errors.len(), 7);
        assert_eq!(
            errors.iter().map(|(_, e)| *e).collect::<Vec<_>>(),
            vec![
                ValidationError::NameRequired,
                ValidationError::SurnameRequired,
                ValidationError::AgeNotANumber,
                ValidationError::WeightNotANumber,
                ValidationError::HeightNotANumber,
                ValidationError::SexNotSelected,
                ValidationError::ActivityLevelNotSelected,
            ]
        );
    }

    #[test]
    fn age_bounds() {
        for (i, (age, valid)) in [("0", false), ("1", true), ("120", true), ("121", false)]
            .into_iter()
            .enumerate()
        {
            let form = PatientForm {
                age: age.to_owned(),
                ..valid_form()
            };
            match form.validate() {
                Ok(_) => assert!(valid, "Test case #{}", i),
                Err(errors) => {
                    assert!(!valid, "Test case #{}", i);
                    assert_eq!(
                        errors.get(Field::Age),
                        Some(&ValidationError::AgeOutOfRange),
                        "Test case #{}",
                        i
                    );
                    assert_eq!(errors.len(), 1, "Test case #{}", i);
                }
            }
        }
    }

    #[test]
    fn weight_upper_bound() {
        let at_bound = PatientForm {
            weight: "300".to_owned(),
            ..valid_form()
        };
        let above_bound = PatientForm {
            weight: "300.1".to_owned(),
            ..valid_form()
        };

        assert!(at_bound.validate().is_ok());
        assert_eq!(
            above_bound.validate().unwrap_err().get(Field::Weight),
            Some(&ValidationError::WeightOutOfRange)
        );
    }

    #[test]
    fn round_trips_through_patient() {
        let patient = valid_form().validate().unwrap();
        let form = PatientForm::from(&patient);

        assert_eq!(form.weight, "68.5");
        assert_eq!(form.validate(), Ok(patient));
    }
}
