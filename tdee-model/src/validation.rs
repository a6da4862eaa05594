use std::{collections::BTreeMap, ops::RangeInclusive};

use itertools::Itertools;
use num::FromPrimitive;

use crate::patient::{ActivityLevel, Sex};

pub const MIN_NAME_LENGTH: usize = 2;
pub const AGE_RANGE: RangeInclusive<i64> = 1..=120;
pub const WEIGHT_RANGE: RangeInclusive<f64> = 20.0..=300.0;
pub const HEIGHT_RANGE: RangeInclusive<f64> = 100.0..=250.0;

/// Form fields, in the order they are presented and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum Field {
    #[strum(to_string = "Nombre")]
    Name,
    #[strum(to_string = "Apellido")]
    Surname,
    #[strum(to_string = "Edad")]
    Age,
    #[strum(to_string = "Peso")]
    Weight,
    #[strum(to_string = "Estatura")]
    Height,
    #[strum(to_string = "Sexo")]
    Sex,
    #[strum(to_string = "Actividad")]
    ActivityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("El nombre es requerido")]
    NameRequired,
    #[error("El nombre debe tener al menos 2 caracteres")]
    NameTooShort,
    #[error("El apellido es requerido")]
    SurnameRequired,
    #[error("El apellido debe tener al menos 2 caracteres")]
    SurnameTooShort,
    #[error("La edad debe ser un número válido")]
    AgeNotANumber,
    #[error("La edad debe estar entre 1 y 120 años")]
    AgeOutOfRange,
    #[error("El peso debe ser un número válido")]
    WeightNotANumber,
    #[error("El peso debe estar entre 20 y 300 kg")]
    WeightOutOfRange,
    #[error("La estatura debe ser un número válido")]
    HeightNotANumber,
    #[error("La estatura debe estar entre 100 y 250 cm")]
    HeightOutOfRange,
    #[error("Debe seleccionar un sexo")]
    SexNotSelected,
    #[error("Debe seleccionar un nivel de actividad")]
    ActivityLevelNotSelected,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::NameRequired | ValidationError::NameTooShort => Field::Name,
            ValidationError::SurnameRequired | ValidationError::SurnameTooShort => Field::Surname,
            ValidationError::AgeNotANumber | ValidationError::AgeOutOfRange => Field::Age,
            ValidationError::WeightNotANumber | ValidationError::WeightOutOfRange => Field::Weight,
            ValidationError::HeightNotANumber | ValidationError::HeightOutOfRange => Field::Height,
            ValidationError::SexNotSelected => Field::Sex,
            ValidationError::ActivityLevelNotSelected => Field::ActivityLevel,
        }
    }
}

/// Field-scoped validation failures, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .errors.values().join("\n"))]
pub struct ValidationErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of a failed check and passes a successful value through.
    /// The first error recorded for a field wins.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.entry(error.field()).or_insert(error);
                None
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn check_text(
    raw: &str,
    required: ValidationError,
    too_short: ValidationError,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(required)
    } else if trimmed.chars().count() < MIN_NAME_LENGTH {
        Err(too_short)
    } else {
        Ok(trimmed.to_owned())
    }
}

pub fn check_name(raw: &str) -> Result<String, ValidationError> {
    check_text(
        raw,
        ValidationError::NameRequired,
        ValidationError::NameTooShort,
    )
}

pub fn check_surname(raw: &str) -> Result<String, ValidationError> {
    check_text(
        raw,
        ValidationError::SurnameRequired,
        ValidationError::SurnameTooShort,
    )
}

pub fn check_age(age: i64) -> Result<u8, ValidationError> {
    if AGE_RANGE.contains(&age) {
        u8::try_from(age).map_err(|_| ValidationError::AgeOutOfRange)
    } else {
        Err(ValidationError::AgeOutOfRange)
    }
}

pub fn check_weight(weight: f64) -> Result<f64, ValidationError> {
    if !weight.is_finite() {
        Err(ValidationError::WeightNotANumber)
    } else if !WEIGHT_RANGE.contains(&weight) {
        Err(ValidationError::WeightOutOfRange)
    } else {
        Ok(weight)
    }
}

pub fn check_height(height: f64) -> Result<f64, ValidationError> {
    if !height.is_finite() {
        Err(ValidationError::HeightNotANumber)
    } else if !HEIGHT_RANGE.contains(&height) {
        Err(ValidationError::HeightOutOfRange)
    } else {
        Ok(height)
    }
}

pub fn parse_age(raw: &str) -> Result<u8, ValidationError> {
    let age = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::AgeNotANumber)?;
    check_age(age)
}

/// Parses a real number typed by hand. A decimal comma is accepted
/// (`"70,5"`) as long as the text has no decimal point.
fn parse_real(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains('.') {
        trimmed.to_owned()
    } else {
        trimmed.replacen(',', ".", 1)
    };
    normalized.parse::<f64>().ok().filter(|x| x.is_finite())
}

pub fn parse_weight(raw: &str) -> Result<f64, ValidationError> {
    let weight = parse_real(raw).ok_or(ValidationError::WeightNotANumber)?;
    check_weight(weight)
}

pub fn parse_height(raw: &str) -> Result<f64, ValidationError> {
    let height = parse_real(raw).ok_or(ValidationError::HeightNotANumber)?;
    check_height(height)
}

pub fn parse_sex(index: Option<usize>) -> Result<Sex, ValidationError> {
    index
        .and_then(Sex::from_usize)
        .ok_or(ValidationError::SexNotSelected)
}

pub fn parse_activity_level(index: Option<usize>) -> Result<ActivityLevel, ValidationError> {
    index
        .and_then(ActivityLevel::from_usize)
        .ok_or(ValidationError::ActivityLevelNotSelected)
}
