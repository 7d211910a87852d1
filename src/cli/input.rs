//! User input utilities for interactive CLI prompts
//!
//! Each prompt is a loop around a pure validator returning either the typed
//! value or a [`Rejection`]. Quitting is reported as [`Prompted::Quit`] and
//! handed back to the caller, which decides how to wind down.

use crate::app::models::{FilterField, RangeFilter};
use crate::app::services::catalog_loader::AccessMode;
use crate::app::services::exporters::OutputSink;
use crate::app::services::numeric::parse_numeric;
use crate::constants::{BOUND_QUIT_TOKENS, PATH_QUIT_TOKENS, prompts};
use crate::{Error, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Answer to a prompt: a value, or a request to stop
#[derive(Debug, Clone, PartialEq)]
pub enum Prompted<T> {
    Value(T),
    Quit,
}

/// Why an answer was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAFile(String),
    NotAFileMode(String),
    NotANumber(String),
    NotAMenuOption(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotAFile(input) => write!(f, "\"{}\" is not a valid file name", input),
            Rejection::NotAFileMode(input) => write!(f, "\"{}\" is not a valid file mode", input),
            Rejection::NotANumber(input) => write!(f, "\"{}\" is not a number", input),
            Rejection::NotAMenuOption(input) => {
                write!(f, "\"{}\" is not a valid menu option", input)
            }
        }
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Whether the input is one of the quit tokens
pub fn is_quit(input: &str, quit_tokens: &[&str]) -> bool {
    quit_tokens.contains(&input)
}

/// Accept a path that can be opened for reading
pub fn validate_file_name(input: &str) -> std::result::Result<PathBuf, Rejection> {
    if input.is_empty() || File::open(input).is_err() {
        return Err(Rejection::NotAFile(input.to_string()));
    }
    Ok(PathBuf::from(input))
}

pub fn validate_file_mode(input: &str) -> std::result::Result<AccessMode, Rejection> {
    input
        .parse::<AccessMode>()
        .map_err(|_| Rejection::NotAFileMode(input.to_string()))
}

/// Accept any number, including negative and fractional bounds
pub fn validate_bound(input: &str) -> std::result::Result<f64, Rejection> {
    parse_numeric(Some(input)).ok_or_else(|| Rejection::NotANumber(input.to_string()))
}

/// Accept a whole number from 1 to `option_count`, returning the zero-based index
///
/// "2.0" selects option 2; "2.5" is rejected.
pub fn validate_menu_choice(
    input: &str,
    option_count: usize,
) -> std::result::Result<usize, Rejection> {
    let reject = || Rejection::NotAMenuOption(input.to_string());
    let value = parse_numeric(Some(input)).ok_or_else(reject)?;

    if value.fract() != 0.0 || value < 1.0 || value > option_count as f64 {
        return Err(reject());
    }
    Ok(value as usize - 1)
}

// =============================================================================
// Session Requests
// =============================================================================

/// Everything a run needs: what to read, how to filter, where to write
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    pub input_file: PathBuf,
    pub mode: AccessMode,
    pub filter: RangeFilter,
    pub sink: OutputSink,
}

/// A request with some answers already known, typically from the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDraft {
    pub input_file: Option<PathBuf>,
    pub mode: Option<AccessMode>,
    pub field: Option<FilterField>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub sink: Option<OutputSink>,
}

impl RequestDraft {
    /// The full request if nothing is missing; the mode defaults to read
    pub fn complete(&self) -> Option<SessionRequest> {
        Some(SessionRequest {
            input_file: self.input_file.clone()?,
            mode: self.mode.unwrap_or_default(),
            filter: RangeFilter::new(self.field?, self.lower?, self.upper?),
            sink: self.sink?,
        })
    }
}

// =============================================================================
// Prompter
// =============================================================================

/// Interactive prompt loop over any line source and output sink
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for every answer missing from `draft`
    ///
    /// When the draft names a file but no mode, the file is read without
    /// asking for a mode.
    pub fn gather(&mut self, draft: RequestDraft) -> Result<Prompted<SessionRequest>> {
        macro_rules! answer {
            ($preset:expr, $ask:expr) => {
                match $preset {
                    Some(value) => value,
                    None => match $ask? {
                        Prompted::Value(value) => value,
                        Prompted::Quit => return Ok(Prompted::Quit),
                    },
                }
            };
        }

        let mode_preset = match (&draft.input_file, draft.mode) {
            (Some(_), None) => Some(AccessMode::Read),
            (_, mode) => mode,
        };

        let input_file = answer!(draft.input_file, self.file_name());
        let mode = answer!(mode_preset, self.file_mode());
        let field = answer!(draft.field, self.filter_field());
        let lower = answer!(draft.lower, self.lower_bound());
        let upper = answer!(draft.upper, self.upper_bound());
        let sink = answer!(draft.sink, self.output_sink());

        Ok(Prompted::Value(SessionRequest {
            input_file,
            mode,
            filter: RangeFilter::new(field, lower, upper),
            sink,
        }))
    }

    pub fn file_name(&mut self) -> Result<Prompted<PathBuf>> {
        let answer = self.ask(prompts::FILE_NAME, PATH_QUIT_TOKENS, validate_file_name)?;
        self.confirm("File name set", &answer, |path| path.display().to_string())?;
        Ok(answer)
    }

    pub fn file_mode(&mut self) -> Result<Prompted<AccessMode>> {
        let answer = self.ask(prompts::FILE_MODE, PATH_QUIT_TOKENS, validate_file_mode)?;
        self.confirm("File mode set", &answer, AccessMode::to_string)?;
        Ok(answer)
    }

    pub fn filter_field(&mut self) -> Result<Prompted<FilterField>> {
        let options = FilterField::ALL;
        let quit = (options.len() + 1).to_string();
        let answer = self
            .ask(prompts::FILTER_FIELD, &[quit.as_str()], |input| {
                validate_menu_choice(input, options.len())
            })?
            .map(|index| options[index]);
        self.confirm("Filtering parameter set", &answer, FilterField::to_string)?;
        Ok(answer)
    }

    pub fn lower_bound(&mut self) -> Result<Prompted<f64>> {
        let answer = self.ask(prompts::LOWER_BOUND, BOUND_QUIT_TOKENS, validate_bound)?;
        self.confirm("Lower bound set", &answer, f64::to_string)?;
        Ok(answer)
    }

    pub fn upper_bound(&mut self) -> Result<Prompted<f64>> {
        let answer = self.ask(prompts::UPPER_BOUND, BOUND_QUIT_TOKENS, validate_bound)?;
        self.confirm("Upper bound set", &answer, f64::to_string)?;
        Ok(answer)
    }

    pub fn output_sink(&mut self) -> Result<Prompted<OutputSink>> {
        let options = OutputSink::ALL;
        let quit = (options.len() + 1).to_string();
        let answer = self
            .ask(prompts::OUTPUT_SINK, &[quit.as_str()], |input| {
                validate_menu_choice(input, options.len())
            })?
            .map(|index| options[index]);
        self.confirm("Output format set", &answer, OutputSink::to_string)?;
        Ok(answer)
    }

    /// Prompt until the validator accepts or a quit token is entered
    ///
    /// End of input counts as quitting.
    fn ask<T, F>(&mut self, prompt: &str, quit_tokens: &[&str], validate: F) -> Result<Prompted<T>>
    where
        F: Fn(&str) -> std::result::Result<T, Rejection>,
    {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let Some(raw) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(Prompted::Quit);
            };
            let input = raw.trim();

            if is_quit(input, quit_tokens) {
                writeln!(self.output, "{}", prompts::QUITTING)?;
                return Ok(Prompted::Quit);
            }

            match validate(input) {
                Ok(value) => return Ok(Prompted::Value(value)),
                Err(rejection) => writeln!(self.output, "ERROR: {}", rejection)?,
            }
        }
    }

    fn confirm<T>(
        &mut self,
        label: &str,
        answer: &Prompted<T>,
        describe: impl Fn(&T) -> String,
    ) -> Result<()> {
        if let Prompted::Value(value) = answer {
            writeln!(self.output, "{}: {}", label, describe(value))?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::io("Failed to read user input", e))?;
        Ok((read > 0).then_some(line))
    }
}

impl<T> Prompted<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Prompted<U> {
        match self {
            Prompted::Value(value) => Prompted::Value(f(value)),
            Prompted::Quit => Prompted::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_menu_choice_for_three_item_menu() {
        for input in ["1", "2", "3"] {
            assert!(validate_menu_choice(input, 3).is_ok(), "input: {input}");
        }
        for input in ["0", "4", "one", "not a number", "", "2.5", "-1"] {
            assert_eq!(
                validate_menu_choice(input, 3),
                Err(Rejection::NotAMenuOption(input.to_string())),
                "input: {input}"
            );
        }
        assert_eq!(validate_menu_choice("2.0", 3), Ok(1));
    }

    #[test]
    fn test_validate_bound() {
        for input in ["0", "1", "12.34", "17777", "-300"] {
            assert_eq!(validate_bound(input), Ok(input.parse::<f64>().unwrap()));
        }
        for input in ["gah;ksld", "lower bound", "h", "1h5"] {
            assert_eq!(
                validate_bound(input),
                Err(Rejection::NotANumber(input.to_string()))
            );
        }
    }

    #[test]
    fn test_validate_file_name() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        assert_eq!(validate_file_name(path), Ok(PathBuf::from(path)));
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("definitely/not/here.txt").is_err());
    }

    #[test]
    fn test_validate_file_mode() {
        assert_eq!(validate_file_mode("x"), Ok(AccessMode::Exclusive));
        assert_eq!(
            validate_file_mode("rb"),
            Err(Rejection::NotAFileMode("rb".to_string()))
        );
    }

    #[test]
    fn test_lower_bound_rejects_then_accepts() {
        let mut p = prompter("abc\n12.5\n");

        assert_eq!(p.lower_bound().unwrap(), Prompted::Value(12.5));

        let out = output_of(p);
        assert_eq!(
            out,
            format!(
                "{}ERROR: \"abc\" is not a number\n{}Lower bound set: 12.5\n",
                prompts::LOWER_BOUND,
                prompts::LOWER_BOUND
            )
        );
    }

    #[test]
    fn test_bound_quit_token() {
        let mut p = prompter("Q\n");

        assert_eq!(p.upper_bound().unwrap(), Prompted::Quit);
        assert!(output_of(p).ends_with("Quitting program now...\n"));
    }

    #[test]
    fn test_output_sink_menu() {
        let mut p = prompter("5\n3\n");

        assert_eq!(p.output_sink().unwrap(), Prompted::Value(OutputSink::Spreadsheet));
        assert!(output_of(p).contains("ERROR: \"5\" is not a valid menu option\n"));
    }

    #[test]
    fn test_output_sink_menu_quit_is_last_option() {
        let mut p = prompter("4\n");
        assert_eq!(p.output_sink().unwrap(), Prompted::Quit);
    }

    #[test]
    fn test_filter_field_menu_quit_is_last_option() {
        let mut p = prompter("3\n");
        assert_eq!(p.filter_field().unwrap(), Prompted::Quit);
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut p = prompter("");
        assert_eq!(p.file_mode().unwrap(), Prompted::Quit);
    }

    #[test]
    fn test_gather_full_session() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let mut p = prompter(&format!("{path}\nr\n2\n1990\n2000\n1\n"));

        let request = p.gather(RequestDraft::default()).unwrap();

        assert_eq!(
            request,
            Prompted::Value(SessionRequest {
                input_file: PathBuf::from(&path),
                mode: AccessMode::Read,
                filter: RangeFilter::new(FilterField::Year, 1990.0, 2000.0),
                sink: OutputSink::Console,
            })
        );
    }

    #[test]
    fn test_gather_asks_only_for_missing_answers() {
        let draft = RequestDraft {
            input_file: Some(PathBuf::from("catalog.txt")),
            field: Some(FilterField::Mass),
            lower: Some(5.0),
            ..Default::default()
        };
        let mut p = prompter("15\n2\n");

        let request = p.gather(draft).unwrap();

        assert_eq!(
            request,
            Prompted::Value(SessionRequest {
                input_file: PathBuf::from("catalog.txt"),
                mode: AccessMode::Read,
                filter: RangeFilter::new(FilterField::Mass, 5.0, 15.0),
                sink: OutputSink::Text,
            })
        );
        let out = output_of(p);
        assert!(!out.contains(prompts::FILE_NAME));
        assert!(!out.contains(prompts::FILE_MODE));
    }

    #[test]
    fn test_gather_stops_at_quit() {
        let mut p = prompter(">q\n");
        assert_eq!(p.gather(RequestDraft::default()).unwrap(), Prompted::Quit);
    }

    #[test]
    fn test_draft_complete() {
        let mut draft = RequestDraft {
            input_file: Some(PathBuf::from("catalog.txt")),
            field: Some(FilterField::Year),
            lower: Some(1990.0),
            upper: Some(2000.0),
            ..Default::default()
        };
        assert!(draft.complete().is_none());

        draft.sink = Some(OutputSink::Console);
        let request = draft.complete().unwrap();
        assert_eq!(request.mode, AccessMode::Read);
        assert_eq!(request.sink, OutputSink::Console);
    }
}
