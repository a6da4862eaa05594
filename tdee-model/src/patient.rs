use num_derive::FromPrimitive;
use strum::{Display, EnumIter};

use crate::metrics::{self, BmiClass, BodyFatClass, Metrics};
use crate::validation::{self, Field, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, Display, EnumIter)]
pub enum Sex {
    #[strum(to_string = "Masculino")]
    Male,
    #[strum(to_string = "Femenino")]
    Female,
}

impl Sex {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_male(self) -> bool {
        self == Sex::Male
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, EnumIter)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
    VeryIntense,
}

impl ActivityLevel {
    pub const MULTIPLIERS: [f64; 5] = [1.2, 1.375, 1.55, 1.725, 1.9];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Factor applied to the basal metabolic rate to get daily expenditure.
    pub fn multiplier(self) -> f64 {
        Self::MULTIPLIERS[self.index()]
    }

    pub fn description(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentario (poco o ningún ejercicio)",
            ActivityLevel::Light => "Ligera (ejercicio ligero 1-3 días/semana)",
            ActivityLevel::Moderate => "Moderada (ejercicio moderado 3-5 días/semana)",
            ActivityLevel::Intense => "Intensa (ejercicio fuerte 6-7 días/semana)",
            ActivityLevel::VeryIntense => {
                "Muy intensa (entrenamiento físico diario o dos veces al día)"
            }
        }
    }
}

/// A patient whose fields have all passed validation.
///
/// There is no way to build one with out-of-range data: construction goes
/// through [`Patient::new`] or [`crate::PatientForm::validate`], and each
/// setter checks the one field it touches. Derived metrics are computed on
/// every call, so they always reflect the current fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    name: String,
    surname: String,
    age: u8,
    weight: f64,
    height: f64,
    sex: Sex,
    activity_level: ActivityLevel,
}

impl Patient {
    pub fn new(
        name: &str,
        surname: &str,
        age: i64,
        weight: f64,
        height: f64,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.check(validation::check_name(name));
        let surname = errors.check(validation::check_surname(surname));
        let age = errors.check(validation::check_age(age));
        let weight = errors.check(validation::check_weight(weight));
        let height = errors.check(validation::check_height(height));

        match (name, surname, age, weight, height) {
            (Some(name), Some(surname), Some(age), Some(weight), Some(height)) => Ok(Self {
                name,
                surname,
                age,
                weight,
                height,
                sex,
                activity_level,
            }),
            _ => Err(errors),
        }
    }

    /// Assembles a patient from values that were already checked one by one.
    pub(crate) fn from_checked(
        name: String,
        surname: String,
        age: u8,
        weight: f64,
        height: f64,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            name,
            surname,
            age,
            weight,
            height,
            sex,
            activity_level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn surname(&self) -> &str {
        &self.surname
    }
    pub fn age(&self) -> u8 {
        self.age
    }
    pub fn weight_kg(&self) -> f64 {
        self.weight
    }
    pub fn height_cm(&self) -> f64 {
        self.height
    }
    pub fn height_m(&self) -> f64 {
        self.height / 100.0
    }
    pub fn sex(&self) -> Sex {
        self.sex
    }
    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validation::check_name(name)?;
        Ok(())
    }

    pub fn set_surname(&mut self, surname: &str) -> Result<(), ValidationError> {
        self.surname = validation::check_surname(surname)?;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> Result<(), ValidationError> {
        self.age = validation::check_age(age)?;
        Ok(())
    }

    pub fn set_weight(&mut self, weight: f64) -> Result<(), ValidationError> {
        self.weight = validation::check_weight(weight)?;
        Ok(())
    }

    pub fn set_height(&mut self, height: f64) -> Result<(), ValidationError> {
        self.height = validation::check_height(height)?;
        Ok(())
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }

    pub fn set_activity_level(&mut self, activity_level: ActivityLevel) {
        self.activity_level = activity_level;
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn basic_info(&self) -> String {
        format!("{} años, {}kg, {}cm", self.age, self.weight, self.height)
    }

    pub fn body_mass_index(&self) -> f64 {
        metrics::body_mass_index(self.weight, self.height)
    }

    pub fn bmi_class(&self) -> BmiClass {
        BmiClass::from_bmi(self.body_mass_index())
    }

    pub fn body_fat_percentage(&self) -> f64 {
        metrics::body_fat_percentage(self.body_mass_index(), self.age, self.sex)
    }

    pub fn body_fat_class(&self) -> BodyFatClass {
        BodyFatClass::from_percentage(self.body_fat_percentage(), self.sex)
    }

    pub fn ideal_weight(&self) -> f64 {
        metrics::ideal_weight(self.height, self.sex)
    }

    pub fn weight_difference(&self) -> f64 {
        metrics::weight_difference(self.weight, self.ideal_weight())
    }

    pub fn basal_metabolic_rate(&self) -> f64 {
        metrics::basal_metabolic_rate(self.weight, self.height, self.age, self.sex)
    }

    pub fn total_daily_energy_expenditure(&self) -> f64 {
        metrics::total_daily_energy_expenditure(self.basal_metabolic_rate(), self.activity_level)
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            body_mass_index: self.body_mass_index(),
            bmi_class: self.bmi_class(),
            body_fat_percentage: self.body_fat_percentage(),
            body_fat_class: self.body_fat_class(),
            ideal_weight: self.ideal_weight(),
            weight_difference: self.weight_difference(),
            basal_metabolic_rate: self.basal_metabolic_rate(),
            total_daily_energy_expenditure: self.total_daily_energy_expenditure(),
        }
    }

    /// Fields whose value differs between `self` and `other`.
    pub fn changed_fields(&self, other: &Patient) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.name != other.name {
            fields.push(Field::Name);
        }
        if self.surname != other.surname {
            fields.push(Field::Surname);
        }
        if self.age != other.age {
            fields.push(Field::Age);
        }
        if self.weight != other.weight {
            fields.push(Field::Weight);
        }
        if self.height != other.height {
            fields.push(Field::Height);
        }
        if self.sex != other.sex {
            fields.push(Field::Sex);
        }
        if self.activity_level != other.activity_level {
            fields.push(Field::ActivityLevel);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn reference_male() -> Patient {
        Patient::new("Juan", "García", 30, 70.0, 175.0, Sex::Male, ActivityLevel::Moderate)
            .unwrap()
    }

    fn reference_female() -> Patient {
        Patient::new("Ana", "Pérez", 25, 60.0, 165.0, Sex::Female, ActivityLevel::Sedentary)
            .unwrap()
    }

    #[test]
    fn male_metrics() {
        let patient = reference_male();

        assert_close(patient.body_mass_index(), 22.86);
        assert_eq!(patient.bmi_class(), BmiClass::Normal);
        assert_close(
            patient.body_fat_percentage(),
            1.2 * 22.86 + 0.23 * 30.0 - 10.8 - 5.4,
        );
        assert_eq!(patient.body_fat_class(), BodyFatClass::Acceptable);
        assert_close(patient.ideal_weight(), 68.75);
        assert_close(patient.weight_difference(), 1.25);
        assert_close(patient.basal_metabolic_rate(), 1650.45);
        assert_close(patient.total_daily_energy_expenditure(), 1650.45 * 1.55);
    }

    #[test]
    fn female_metrics() {
        let patient = reference_female();

        assert_close(patient.body_mass_index(), 22.04);
        assert_eq!(patient.bmi_class(), BmiClass::Normal);
        assert_eq!(patient.body_fat_class(), BodyFatClass::Acceptable);
        assert_close(patient.ideal_weight(), 59.0);
        assert_close(patient.weight_difference(), 1.0);
        assert_close(patient.basal_metabolic_rate(), 1346.65);
        assert_close(patient.total_daily_energy_expenditure(), 1346.65 * 1.2);
    }

    #[test]
    fn summary_text() {
        assert_eq!(
            reference_male().metrics().to_string(),
            "IMC: 22.9 (Peso normal)\n\
             % Grasa: 18.1% (Aceptable)\n\
             Peso Ideal: 68.8 kg\n\
             BMR: 1650 cal/día\n\
             TDEE: 2558 cal/día"
        );
    }

    #[test]
    fn bmi_class_on_computed_boundaries() {
        let test_data = [
            (64.0, 160.0, BmiClass::Overweight, "IMC: 25.0 (Sobrepeso)"),
            (30.25, 110.0, BmiClass::Overweight, "IMC: 25.0 (Sobrepeso)"),
            (76.8, 160.0, BmiClass::ObesityClassI, "IMC: 30.0 (Obesidad clase I)"),
            (47.36, 160.0, BmiClass::Normal, "IMC: 18.5 (Peso normal)"),
        ];

        for (i, (weight, height, expected_class, expected_line)) in
            test_data.into_iter().enumerate()
        {
            let patient =
                Patient::new("Eva", "Ríos", 40, weight, height, Sex::Female, ActivityLevel::Light)
                    .unwrap();
            assert_eq!(patient.bmi_class(), expected_class, "Test case #{}", i);
            assert!(
                patient.metrics().to_string().starts_with(expected_line),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn identity_text() {
        let patient = reference_female();
        assert_eq!(patient.full_name(), "Ana Pérez");
        assert_eq!(patient.basic_info(), "25 años, 60kg, 165cm");
    }

    #[test]
    fn tdee_uses_one_of_the_fixed_multipliers() {
        let mut patient = reference_male();
        for (level, multiplier) in ActivityLevel::iter().zip(ActivityLevel::MULTIPLIERS) {
            patient.set_activity_level(level);
            assert_close(
                patient.total_daily_energy_expenditure(),
                patient.basal_metabolic_rate() * multiplier,
            );
        }
    }

    #[test]
    fn editing_weight_updates_metrics_only() {
        let mut patient = reference_male();
        let before = patient.clone();

        patient.set_weight(90.0).unwrap();

        assert_eq!(patient.changed_fields(&before), vec![Field::Weight]);
        assert_eq!(patient.full_name(), before.full_name());
        assert_eq!(patient.age(), before.age());
        assert_close(patient.body_mass_index(), 29.39);
        assert_eq!(patient.bmi_class(), BmiClass::Overweight);
        assert!(patient.basal_metabolic_rate() > before.basal_metabolic_rate());
        assert_close(patient.ideal_weight(), before.ideal_weight());
    }

    #[test]
    fn rejected_edit_keeps_previous_value() {
        let mut patient = reference_male();

        assert_eq!(patient.set_age(121), Err(ValidationError::AgeOutOfRange));
        assert_eq!(patient.set_height(99.9), Err(ValidationError::HeightOutOfRange));
        assert_eq!(patient.set_name(" "), Err(ValidationError::NameRequired));

        assert_eq!(patient, reference_male());
    }

    #[test]
    fn changing_sex_switches_formulas() {
        let mut patient = reference_male();
        patient.set_sex(Sex::Female);

        assert_close(patient.ideal_weight(), 175.0 - 100.0 - 25.0 / 2.5);
        assert_close(patient.basal_metabolic_rate(), 1650.45 - 5.0 - 161.0);
    }

    #[test]
    fn new_reports_every_invalid_field() {
        let errors =
            Patient::new("J", "", 0, 300.1, 251.0, Sex::Male, ActivityLevel::Light).unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                Field::Name,
                Field::Surname,
                Field::Age,
                Field::Weight,
                Field::Height
            ]
        );
    }

    #[test]
    fn indices_map_to_variants() {
        use num::FromPrimitive;

        assert_eq!(Sex::from_usize(0), Some(Sex::Male));
        assert_eq!(Sex::from_usize(1), Some(Sex::Female));
        assert_eq!(Sex::from_usize(2), None);
        assert_eq!(ActivityLevel::from_usize(4), Some(ActivityLevel::VeryIntense));
        assert_eq!(ActivityLevel::from_usize(5), None);
        assert_eq!(ActivityLevel::Intense.multiplier(), 1.725);
        assert_eq!(Sex::Female.to_string(), "Femenino");
    }
}
