// SPDX-License-Identifier: MIT
//
// Command-line parsing.
//
// The grammar is small enough to walk by hand:
//
//   color-gradient-tool [-v] gradient [--space S] [--format F] [--input I]
//                                     [--steps N] [--center C] [--save] [A B]
//   color-gradient-tool [-v] convert  [--from F] [--save] [FILE]
//   color-gradient-tool [-v] spaces
//
// `-v`/`--verbose` and `-h`/`--help` are accepted anywhere. Flags take their
// value either as the next argument or after `=` (`--steps=9`).

use std::path::PathBuf;

use cg_color::{ColorSpace, Notation};

pub const USAGE: &str = "\
usage: color-gradient-tool [-v] <command> [options]

commands:
  gradient [--space S] [--format F] [--input I] [--steps N] [--center C]
           [--save] [A B]
      Print a gradient from A to B, one color per line. --center switches
      to 3-color mode (A -> C -> B). Without A and B the stored seeds and
      mode are used. Seeds are hex, or RGB triples in the --input notation
      (rgb256 or rgb01; rgb256 when omitted).
  convert [--from F] [--save] [FILE]
      Read a color list from FILE (or stdin) and print it as hex, RGB 256,
      and RGB 0-1.
  spaces
      List the color spaces a gradient can be computed in.

options:
  -v, --verbose   log debug detail to stderr
  -h, --help      show this message

Missing options fall back to the stored settings.";

/// Why the arguments could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("no command given")]
    MissingCommand,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("unknown option {0:?}")]
    UnknownFlag(String),

    #[error("option {0} needs a value")]
    MissingValue(&'static str),

    #[error("invalid value {value:?} for {flag}: {reason}")]
    InvalidValue {
        flag: &'static str,
        value: String,
        reason: String,
    },

    #[error("{command} takes {expected} argument(s), got {got}")]
    WrongArgCount {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },
}

/// `gradient` arguments. `None` means "use the stored setting".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GradientArgs {
    pub space: Option<ColorSpace>,
    pub format: Option<Notation>,
    /// How RGB seeds on the command line are written.
    pub input: Option<Notation>,
    pub steps: Option<usize>,
    pub center: Option<String>,
    pub save: bool,
    /// A and B, or `None` to use the stored seeds.
    pub ends: Option<(String, String)>,
}

/// `convert` arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvertArgs {
    pub from: Option<Notation>,
    pub save: bool,
    /// Read stdin when absent.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Gradient(GradientArgs),
    Convert(ConvertArgs),
    Spaces,
    Help,
}

/// A fully parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub verbose: bool,
    pub command: Command,
}

/// Parse the arguments after the program name.
///
/// # Errors
///
/// Returns a [`CliError`] for an unknown command or option, a missing or
/// malformed option value, or the wrong number of positional arguments.
pub fn parse<I, S>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut verbose = false;
    let mut help = false;
    let mut rest = Vec::new();
    for arg in args.into_iter().map(Into::into) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => help = true,
            _ => rest.push(arg),
        }
    }

    if help {
        return Ok(Cli {
            verbose,
            command: Command::Help,
        });
    }

    let mut rest = rest.into_iter();
    let command = match rest.next().as_deref() {
        None => return Err(CliError::MissingCommand),
        Some("gradient") => Command::Gradient(parse_gradient(rest)?),
        Some("convert") => Command::Convert(parse_convert(rest)?),
        Some("spaces") => match rest.len() {
            0 => Command::Spaces,
            got => {
                return Err(CliError::WrongArgCount {
                    command: "spaces",
                    expected: "no",
                    got,
                });
            }
        },
        Some("help") => Command::Help,
        Some(other) => return Err(CliError::UnknownCommand(other.to_string())),
    };

    Ok(Cli { verbose, command })
}

// ─── Subcommands ─────────────────────────────────────────────────────────────

fn parse_gradient(args: impl Iterator<Item = String>) -> Result<GradientArgs, CliError> {
    let mut out = GradientArgs::default();
    let mut positional = Vec::new();
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        let Some(flag) = split_flag(&arg) else {
            positional.push(arg);
            continue;
        };
        match flag {
            ("--space", inline) => {
                let value = flag_value("--space", inline, &mut args)?;
                out.space = Some(parse_named("--space", &value)?);
            }
            ("--format", inline) => {
                let value = flag_value("--format", inline, &mut args)?;
                out.format = Some(parse_named("--format", &value)?);
            }
            ("--input", inline) => {
                let value = flag_value("--input", inline, &mut args)?;
                out.input = Some(parse_named("--input", &value)?);
            }
            ("--steps", inline) => {
                let value = flag_value("--steps", inline, &mut args)?;
                out.steps = Some(parse_steps(&value)?);
            }
            ("--center", inline) => {
                out.center = Some(flag_value("--center", inline, &mut args)?);
            }
            ("--save", None) => out.save = true,
            _ => return Err(CliError::UnknownFlag(arg)),
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.len()) {
        (None, _, _) => {}
        (Some(a), Some(b), 0) => out.ends = Some((a, b)),
        (Some(_), b, rest) => {
            return Err(CliError::WrongArgCount {
                command: "gradient",
                expected: "0 or 2",
                got: 1 + usize::from(b.is_some()) + rest,
            });
        }
    }
    Ok(out)
}

fn parse_convert(args: impl Iterator<Item = String>) -> Result<ConvertArgs, CliError> {
    let mut out = ConvertArgs::default();
    let mut positional = Vec::new();
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        let Some(flag) = split_flag(&arg) else {
            positional.push(arg);
            continue;
        };
        match flag {
            ("--from", inline) => {
                let value = flag_value("--from", inline, &mut args)?;
                out.from = Some(parse_named("--from", &value)?);
            }
            ("--save", None) => out.save = true,
            _ => return Err(CliError::UnknownFlag(arg)),
        }
    }

    match positional.len() {
        0 => {}
        1 => out.file = positional.pop().map(PathBuf::from),
        got => {
            return Err(CliError::WrongArgCount {
                command: "convert",
                expected: "0 or 1",
                got,
            });
        }
    }
    Ok(out)
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// `--name=value` → `("--name", Some("value"))`, `--name` → `("--name", None)`.
///
/// Anything not starting with `--` is positional. A lone `-` is positional too.
fn split_flag(arg: &str) -> Option<(&str, Option<&str>)> {
    if !arg.starts_with("--") {
        return None;
    }
    Some(match arg.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (arg, None),
    })
}

/// The value of `flag`, inline or taken from the next argument.
fn flag_value(
    flag: &'static str,
    inline: Option<&str>,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> Result<String, CliError> {
    if let Some(value) = inline {
        return Ok(value.to_string());
    }
    args.next_if(|next| !next.starts_with("--"))
        .ok_or(CliError::MissingValue(flag))
}

fn parse_named<T>(flag: &'static str, value: &str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| CliError::InvalidValue {
        flag,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_steps(value: &str) -> Result<usize, CliError> {
    parse_named("--steps", value)
}
