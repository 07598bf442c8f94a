//! Command handlers, one module per subcommand group.

pub mod comment;
pub mod dashboard;
pub mod event;
pub mod metric;
pub mod search;
pub mod tag;

use crate::output::{self, OutputFormat};
use dog_lib::{report_errors, report_warnings, ApiResponse, Client, Error};
use serde_json::Value;
use std::io::Read;

/// Why a command failed.
#[derive(Debug)]
pub enum CommandError {
    /// Server errors were already written to stderr.
    Reported,
    Lib(Error),
    Usage(String),
}

impl From<Error> for CommandError {
    fn from(e: Error) -> Self {
        CommandError::Lib(e)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        CommandError::Lib(Error::Io(e))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Lib(Error::Json(e))
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Everything a handler needs besides its own arguments.
pub struct Context<'a> {
    pub client: &'a Client,
    pub format: OutputFormat,
    pub use_utc: bool,
}

impl Context<'_> {
    /// Print warnings and errors carried by a successful response; fail if there were errors.
    pub fn checked(&self, res: ApiResponse) -> Result<ApiResponse, CommandError> {
        let mut stderr = std::io::stderr().lock();
        report_warnings(&res, &mut stderr);
        if res.has_errors() {
            report_errors(&res, &mut stderr);
            return Err(CommandError::Reported);
        }
        Ok(res)
    }

    /// Print a response in `pretty` or `raw` form. Returns false in `plain` mode so the
    /// caller can render its own line format.
    pub fn print_structured(&self, body: &Value) -> Result<bool, CommandError> {
        match self.format {
            OutputFormat::Plain => Ok(false),
            OutputFormat::Pretty => {
                print!("{}", output::format_pretty(body));
                Ok(true)
            }
            OutputFormat::Raw => {
                println!("{}", output::format_json_compact(body)?);
                Ok(true)
            }
        }
    }

    /// Print a JSON payload: pretty-printed in `pretty` mode, compact otherwise.
    pub fn print_json(&self, body: &Value) -> CommandResult {
        match self.format {
            OutputFormat::Pretty => println!("{}", output::format_json(body)?),
            _ => println!("{}", output::format_json_compact(body)?),
        }
        Ok(())
    }

    pub fn permalink(&self) -> impl Fn(u64) -> String + '_ {
        move |id| self.client.permalink(id)
    }
}

/// Read all of stdin as UTF-8.
pub fn read_stdin() -> Result<String, CommandError> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
