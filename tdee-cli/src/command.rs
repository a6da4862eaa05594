use std::str::FromStr;

pub const HELP: &str = "Comandos:
  nuevo          registrar un paciente
  lista          listar los pacientes
  ver N          mostrar los cálculos del paciente N
  editar N       editar el paciente N
  eliminar N     eliminar el paciente N
  actividades    niveles de actividad disponibles
  ayuda          mostrar esta ayuda
  salir          terminar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    List,
    Show(usize),
    Edit(usize),
    Delete(usize),
    Activities,
    Help,
    Quit,
}

/// Parses the 1-based roster position following a command.
fn position(argument: Option<&str>) -> Result<usize, String> {
    let argument = argument.ok_or_else(|| "Falta el número de paciente".to_owned())?;
    argument
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| format!("Número de paciente inválido: {}", argument))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let keyword = words.next().unwrap_or_default().to_lowercase();
        let argument = words.next();

        match keyword.as_str() {
            "nuevo" | "add" => Ok(Command::Add),
            "lista" | "list" => Ok(Command::List),
            "ver" | "show" => Ok(Command::Show(position(argument)?)),
            "editar" | "edit" => Ok(Command::Edit(position(argument)?)),
            "eliminar" | "delete" => Ok(Command::Delete(position(argument)?)),
            "actividades" | "activities" => Ok(Command::Activities),
            "ayuda" | "help" => Ok(Command::Help),
            "salir" | "quit" => Ok(Command::Quit),
            _ => Err(format!("Comando desconocido: {}", s.trim())),
        }
    }
}
