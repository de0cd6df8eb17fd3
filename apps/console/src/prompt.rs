//! # Stdin Prompt
//!
//! [`OperatorPrompt`] implementation over standard input. Each question is
//! one printed prompt followed by one blocking line read; validation and
//! normalization happen here so the workflow layer only ever sees clean
//! plates.

use std::io::{self, Write};

use gatehouse_core::ports::{OperatorPrompt, PromptError};
use gatehouse_core::{validate_plate, VehicleType};
use tracing::debug;

/// One-line-at-a-time input source.
///
/// Decouples the prompt from process stdin so tests can script answers.
pub trait LineSource: Send {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

/// Process stdin. Locks per read, so the menu loop and the prompt can
/// share the stream without holding a lock across questions.
pub struct StdinSource;

impl LineSource for StdinSource {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::stdin().read_line(buf)
    }
}

/// Operator prompt backed by a line source.
pub struct StdinPrompt<S> {
    input: S,
}

impl StdinPrompt<StdinSource> {
    /// Prompt over the process stdin.
    pub fn stdin() -> Self {
        StdinPrompt { input: StdinSource }
    }
}

impl<S: LineSource> StdinPrompt<S> {
    /// Prompt over any line source (scripted input in tests).
    pub fn new(input: S) -> Self {
        StdinPrompt { input }
    }

    /// Reads one line, trimmed. `None` on end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<S: LineSource> OperatorPrompt for StdinPrompt<S> {
    fn select_vehicle_category(&mut self) -> Option<VehicleType> {
        println!("Please select vehicle type from menu");
        println!("1 CAR");
        println!("2 BIKE");
        let _ = io::stdout().flush();

        let line = match self.read_line() {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => return None,
        };

        let selection: i64 = match line.parse() {
            Ok(n) => n,
            Err(_) => {
                debug!(input = %line, "non-numeric category selection");
                return None;
            }
        };

        VehicleType::from_selection(selection)
    }

    fn read_plate_number(&mut self) -> Result<String, PromptError> {
        println!("Please type the vehicle registration number and press enter key");
        let _ = io::stdout().flush();

        let line = self.read_line()?.ok_or(PromptError::Closed)?;
        Ok(validate_plate(&line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted answers, one per prompt.
    struct Script(VecDeque<&'static str>);

    impl Script {
        fn new(lines: &[&'static str]) -> Self {
            Script(lines.iter().copied().collect())
        }
    }

    impl LineSource for Script {
        fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(line) => {
                    buf.push_str(line);
                    buf.push('\n');
                    Ok(line.len() + 1)
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn selects_car_for_menu_option_one() {
        let mut prompt = StdinPrompt::new(Script::new(&["1"]));
        assert_eq!(prompt.select_vehicle_category(), Some(VehicleType::Car));
    }

    #[test]
    fn selects_bike_for_menu_option_two() {
        let mut prompt = StdinPrompt::new(Script::new(&["2"]));
        assert_eq!(prompt.select_vehicle_category(), Some(VehicleType::Bike));
    }

    #[test]
    fn out_of_menu_selection_is_none() {
        let mut prompt = StdinPrompt::new(Script::new(&["3"]));
        assert_eq!(prompt.select_vehicle_category(), None);
    }

    #[test]
    fn non_numeric_selection_is_none() {
        let mut prompt = StdinPrompt::new(Script::new(&["car"]));
        assert_eq!(prompt.select_vehicle_category(), None);
    }

    #[test]
    fn plate_is_trimmed_and_uppercased() {
        let mut prompt = StdinPrompt::new(Script::new(&["  abc def "]));
        assert_eq!(prompt.read_plate_number().unwrap(), "ABC DEF");
    }

    #[test]
    fn empty_plate_is_rejected() {
        let mut prompt = StdinPrompt::new(Script::new(&["   "]));
        assert!(matches!(
            prompt.read_plate_number(),
            Err(PromptError::InvalidPlate(_))
        ));
    }

    #[test]
    fn closed_input_is_reported() {
        let mut prompt = StdinPrompt::new(Script::new(&[]));
        assert!(matches!(
            prompt.read_plate_number(),
            Err(PromptError::Closed)
        ));
    }
}
