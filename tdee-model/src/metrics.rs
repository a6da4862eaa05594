use std::fmt;

use strum::Display;

use crate::patient::{ActivityLevel, Sex};

/// Rounded to 2 decimals, so a value that is mathematically on a class
/// boundary (64 kg at 160 cm is exactly 25) lands on it instead of just below.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let bmi = weight_kg / (height_cm / 100.0).powf(2.0);
    (bmi * 100.0).round() / 100.0
}

pub fn body_fat_percentage(body_mass_index: f64, age: u8, sex: Sex) -> f64 {
    let male = if sex.is_male() { 1.0 } else { 0.0 };
    1.2 * body_mass_index + 0.23 * age as f64 - 10.8 * male - 5.4
}

pub fn ideal_weight(height_cm: f64, sex: Sex) -> f64 {
    let divisor = if sex.is_male() { 4.0 } else { 2.5 };
    height_cm - 100.0 - (height_cm - 150.0) / divisor
}

pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u8, sex: Sex) -> f64 {
    let base = 6.25 * height_cm + 9.99 * weight_kg - 4.92 * age as f64;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Current weight minus ideal weight; positive when above it.
pub fn weight_difference(weight_kg: f64, ideal_weight: f64) -> f64 {
    weight_kg - ideal_weight
}

/// Signed difference with one decimal, plain `0` when it rounds to zero.
pub fn format_weight_difference(difference: f64) -> String {
    if (difference * 10.0).round() == 0.0 {
        "0".to_owned()
    } else {
        format!("{:+.1}", difference)
    }
}

pub fn total_daily_energy_expenditure(basal_metabolic_rate: f64, activity: ActivityLevel) -> f64 {
    basal_metabolic_rate * activity.multiplier()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BmiClass {
    #[strum(to_string = "Bajo peso")]
    Underweight,
    #[strum(to_string = "Peso normal")]
    Normal,
    #[strum(to_string = "Sobrepeso")]
    Overweight,
    #[strum(to_string = "Obesidad clase I")]
    ObesityClassI,
    #[strum(to_string = "Obesidad clase II")]
    ObesityClassII,
    #[strum(to_string = "Obesidad clase III")]
    ObesityClassIII,
}

impl BmiClass {
    /// Each bound is exclusive: 25.0 is already overweight.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiClass::Underweight
        } else if bmi < 25.0 {
            BmiClass::Normal
        } else if bmi < 30.0 {
            BmiClass::Overweight
        } else if bmi < 35.0 {
            BmiClass::ObesityClassI
        } else if bmi < 40.0 {
            BmiClass::ObesityClassII
        } else {
            BmiClass::ObesityClassIII
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BodyFatClass {
    #[strum(to_string = "Grasa esencial")]
    Essential,
    #[strum(to_string = "Atletas")]
    Athletes,
    #[strum(to_string = "Fitness")]
    Fitness,
    #[strum(to_string = "Aceptable")]
    Acceptable,
    #[strum(to_string = "Obesidad")]
    Obese,
}

impl BodyFatClass {
    /// Inclusive upper bounds of the first four bands.
    fn bounds(sex: Sex) -> [f64; 4] {
        match sex {
            Sex::Male => [5.0, 13.0, 17.0, 24.0],
            Sex::Female => [13.0, 20.0, 24.0, 31.0],
        }
    }

    pub fn from_percentage(percentage: f64, sex: Sex) -> Self {
        let [essential, athletes, fitness, acceptable] = Self::bounds(sex);
        if percentage <= essential {
            BodyFatClass::Essential
        } else if percentage <= athletes {
            BodyFatClass::Athletes
        } else if percentage <= fitness {
            BodyFatClass::Fitness
        } else if percentage <= acceptable {
            BodyFatClass::Acceptable
        } else {
            BodyFatClass::Obese
        }
    }
}

/// Snapshot of every value derived from a patient.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metrics {
    pub body_mass_index: f64,
    pub bmi_class: BmiClass,
    pub body_fat_percentage: f64,
    pub body_fat_class: BodyFatClass,
    pub ideal_weight: f64,
    pub weight_difference: f64,
    pub basal_metabolic_rate: f64,
    pub total_daily_energy_expenditure: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IMC: {:.1} ({})", self.body_mass_index, self.bmi_class)?;
        writeln!(
            f,
            "% Grasa: {:.1}% ({})",
            self.body_fat_percentage, self.body_fat_class
        )?;
        writeln!(f, "Peso Ideal: {:.1} kg", self.ideal_weight)?;
        writeln!(f, "BMR: {:.0} cal/día", self.basal_metabolic_rate)?;
        write!(f, "TDEE: {:.0} cal/día", self.total_daily_energy_expenditure)
    }
}
