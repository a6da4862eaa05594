use std::io::{self, BufRead, Write};

use itertools::Itertools;
use log::{debug, error, info};
use strum::IntoEnumIterator;
use tdee_model::metrics::format_weight_difference;
use tdee_model::{ActivityLevel, Field, PatientForm, Sex, ValidationErrors};
use tdee_roster::{PatientRepository, RosterEntry};

use crate::command::{Command, HELP};

const TEXT_FIELDS: [Field; 5] = [
    Field::Name,
    Field::Surname,
    Field::Age,
    Field::Weight,
    Field::Height,
];

/// Line-oriented console over a patient roster.
pub struct App<R, W> {
    repository: Box<dyn PatientRepository>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(repository: Box<dyn PatientRepository>, input: R, output: W) -> Self {
        Self {
            repository,
            input,
            output,
        }
    }

    /// Runs commands until `salir` or end of input. Only I/O failures end
    /// the loop with an error; everything else is reported inline.
    pub fn run(&mut self) -> io::Result<()> {
        info!("Starting console");
        writeln!(
            self.output,
            "Calculadora TDEE. Escriba 'ayuda' para ver los comandos."
        )?;

        while let Some(line) = self.prompt("> ")? {
            if line.is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            debug!("Executing {:?}", command);
            match command {
                Command::Add => self.add()?,
                Command::List => self.list()?,
                Command::Show(position) => self.show(position)?,
                Command::Edit(position) => self.edit(position)?,
                Command::Delete(position) => self.delete(position)?,
                Command::Activities => self.activities()?,
                Command::Help => writeln!(self.output, "{}", HELP)?,
                Command::Quit => break,
            }
        }

        info!("Console closed");
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_field(
        &mut self,
        field: Field,
        current: Option<String>,
    ) -> io::Result<Option<String>> {
        let text = match &current {
            Some(value) => format!("{} [{}]: ", field, value),
            None => format!("{}: ", field),
        };
        let answer = self.prompt(&text)?;
        Ok(answer.map(|answer| match current {
            Some(value) if answer.is_empty() => value,
            _ => answer,
        }))
    }

    /// Fills a form interactively. With `current`, an empty answer keeps the
    /// existing value. Returns `None` if input ends halfway through.
    fn read_form(&mut self, current: Option<&PatientForm>) -> io::Result<Option<PatientForm>> {
        let editing = current.is_some();
        let mut form = current.cloned().unwrap_or_default();

        for field in TEXT_FIELDS {
            let existing = if editing {
                form.text_mut(field).cloned()
            } else {
                None
            };
            let Some(answer) = self.prompt_field(field, existing)? else {
                return Ok(None);
            };
            if let Some(slot) = form.text_mut(field) {
                *slot = answer;
            }
        }

        self.print_options(Sex::iter().map(|sex| (sex.index(), sex.to_string())))?;
        let existing = form.sex.filter(|_| editing).map(|i| i.to_string());
        let Some(answer) = self.prompt_field(Field::Sex, existing)? else {
            return Ok(None);
        };
        form.sex = answer.parse().ok();

        self.activities()?;
        let existing = form
            .activity_level
            .filter(|_| editing)
            .map(|i| i.to_string());
        let Some(answer) = self.prompt_field(Field::ActivityLevel, existing)? else {
            return Ok(None);
        };
        form.activity_level = answer.parse().ok();

        Ok(Some(form))
    }

    fn print_options(&mut self, options: impl Iterator<Item = (usize, String)>) -> io::Result<()> {
        let lines = options
            .map(|(index, label)| format!("  {}) {}", index, label))
            .join("\n");
        writeln!(self.output, "{}", lines)
    }

    /// Asks a yes/no question. End of input counts as no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{} (s/n): ", question))?;
        Ok(answer.is_some_and(|answer| {
            matches!(
                answer.to_lowercase().as_str(),
                "s" | "si" | "sí" | "y" | "yes"
            )
        }))
    }

    fn report_errors(&mut self, errors: &ValidationErrors) -> io::Result<()> {
        debug!("Form rejected, invalid fields: {:?}", errors.fields().collect_vec());
        writeln!(self.output, "No se pudo guardar el paciente:")?;
        for (field, error) in errors.iter() {
            writeln!(self.output, "  - {}: {}", field, error)?;
        }
        Ok(())
    }

    fn entry_at(&mut self, position: usize) -> io::Result<Option<RosterEntry>> {
        let entry = self.repository.list().into_iter().nth(position - 1);
        if entry.is_none() {
            writeln!(self.output, "No existe el paciente {}", position)?;
        }
        Ok(entry)
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(form) = self.read_form(None)? else {
            return Ok(());
        };
        match form.validate() {
            Ok(patient) => {
                let full_name = patient.full_name();
                let metrics = patient.metrics();
                self.repository.register(patient);
                writeln!(
                    self.output,
                    "Paciente {} registrado correctamente.",
                    full_name
                )?;
                writeln!(self.output, "{}", metrics)
            }
            Err(errors) => self.report_errors(&errors),
        }
    }

    fn list(&mut self) -> io::Result<()> {
        let entries = self.repository.list();
        if entries.is_empty() {
            return writeln!(self.output, "No hay pacientes registrados.");
        }
        let lines = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{}. {} ({})",
                    i + 1,
                    entry.patient.full_name(),
                    entry.patient.basic_info()
                )
            })
            .join("\n");
        writeln!(self.output, "{}", lines)
    }

    fn show(&mut self, position: usize) -> io::Result<()> {
        let Some(entry) = self.entry_at(position)? else {
            return Ok(());
        };
        let patient = &entry.patient;
        writeln!(self.output, "{}", patient.full_name())?;
        writeln!(self.output, "{}", patient.basic_info())?;
        writeln!(self.output, "Sexo: {}", patient.sex())?;
        writeln!(
            self.output,
            "Actividad: {}",
            patient.activity_level().description()
        )?;
        let metrics = patient.metrics();
        writeln!(self.output, "{}", metrics)?;
        writeln!(
            self.output,
            "Diferencia: {} kg",
            format_weight_difference(metrics.weight_difference)
        )
    }

    fn edit(&mut self, position: usize) -> io::Result<()> {
        let Some(entry) = self.entry_at(position)? else {
            return Ok(());
        };
        let current = PatientForm::from(&entry.patient);
        let Some(form) = self.read_form(Some(&current))? else {
            return Ok(());
        };
        let patient = match form.validate() {
            Ok(patient) => patient,
            Err(errors) => return self.report_errors(&errors),
        };

        let full_name = patient.full_name();
        let metrics = patient.metrics();
        if let Err(e) = self.repository.update(entry.id, patient) {
            error!("Failed to update patient {}: {}", entry.id, e);
            return writeln!(self.output, "Error: {}", e);
        }
        writeln!(self.output, "Paciente {} actualizado.", full_name)?;
        writeln!(self.output, "{}", metrics)
    }

    fn delete(&mut self, position: usize) -> io::Result<()> {
        let Some(entry) = self.entry_at(position)? else {
            return Ok(());
        };
        let question = format!("¿Está seguro de eliminar a {}?", entry.patient.full_name());
        if !self.confirm(&question)? {
            debug!("Removal of patient {} cancelled", entry.id);
            return writeln!(self.output, "Eliminación cancelada.");
        }
        match self.repository.remove(entry.id) {
            Ok(removed) => writeln!(
                self.output,
                "Paciente {} eliminado.",
                removed.patient.full_name()
            ),
            Err(e) => {
                error!("Failed to remove patient {}: {}", entry.id, e);
                writeln!(self.output, "Error: {}", e)
            }
        }
    }

    fn activities(&mut self) -> io::Result<()> {
        self.print_options(ActivityLevel::iter().map(|level| {
            let label = format!("{} x{}", level.description(), level.multiplier());
            (level.index(), label)
        }))
    }
}
