//! Command-line configuration for the `red` binary.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::terminal::terminal_size_or_default;

pub const HELP_TEXT: &str = "red - a small modal text editor

USAGE:
    red [OPTIONS] [FILE]

ARGS:
    FILE                    Text to start from; it is never written back

OPTIONS:
    -h, --help              Print this help message and exit
    --no-alt-screen         Draw on the main screen instead of the alternate one
    --size <WxH>            Use this screen size instead of asking the terminal
    --log <PATH>            Append log lines to PATH

KEYS:
    Normal mode: h j k l move, i insert, a append, o open line, u undo, q quit
    Insert mode: type to insert, Esc back to normal mode
    Ctrl+Q quits from either mode
";

/// Editor configuration parsed from command-line arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub use_alt_screen: bool,
    /// Forced `(columns, rows)`; detected from the terminal when `None`.
    pub size: Option<(u16, u16)>,
    pub log_path: Option<PathBuf>,
    /// File seeding the original buffer.
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_alt_screen: true,
            size: None,
            log_path: None,
            file: None,
        }
    }
}

/// Result of parsing command-line arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed configuration.
    Config(Config),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments, program name first.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();

            match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,

                "--no-alt-screen" => config.use_alt_screen = false,

                "--size" => {
                    let value = match args.next() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => return ParseResult::Error("--size requires a value".to_string()),
                    };
                    match parse_size(&value) {
                        Some(size) => config.size = Some(size),
                        None => {
                            return ParseResult::Error(format!(
                                "Invalid --size value: {value} (expected WxH, e.g. 80x24)"
                            ));
                        }
                    }
                }

                "--log" => match args.next() {
                    Some(path) => config.log_path = Some(PathBuf::from(path)),
                    None => return ParseResult::Error("--log requires a path".to_string()),
                },

                other if other.starts_with('-') && other != "-" => {
                    return ParseResult::Error(format!("Unknown option: {other}"));
                }

                _ => {
                    if config.file.is_some() {
                        return ParseResult::Error(format!(
                            "Unexpected argument: {arg_str} (only one FILE is accepted)"
                        ));
                    }
                    config.file = Some(PathBuf::from(&arg));
                }
            }
        }

        ParseResult::Config(config)
    }

    /// Screen size: the forced one, or the terminal's.
    #[must_use]
    pub fn screen_size(&self) -> (u16, u16) {
        self.size.unwrap_or_else(terminal_size_or_default)
    }

    /// Contents of the seed file, or an empty string without one.
    pub fn original_text(&self) -> Result<String> {
        match &self.file {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => Ok(String::new()),
        }
    }
}

/// Parse a size string like "80x24" into (width, height).
fn parse_size(s: &str) -> Option<(u16, u16)> {
    let (w, h) = s.split_once('x')?;
    let w = w.parse::<u16>().ok()?;
    let h = h.parse::<u16>().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}
