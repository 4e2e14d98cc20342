// SPDX-License-Identifier: MIT
//
// color-gradient-tool — gradients and color notation conversion from the
// command line.
//
// This binary wires the library crates to a small CLI:
//
//   cg-color    → ColorValue, notations, color-space math
//   cg-input    → tolerant pasted-list parsing, bulk conversion
//   cg-gradient → requests, validation, the gradient engine
//
// Each invocation flows through:
//
//   args → cli::parse → settings (stored defaults + flags) → engine/converter
//        → stdout, one color per line
//
// Diagnostics go to stderr through tracing; stdout carries only results so
// it can be piped.

mod cli;
mod settings;

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, bail};
use cg_color::{ColorSpace, ColorValue, Notation};
use cg_gradient::{GradientEngine, GradientRequest, Mode, Role, SeedSet};
use cg_input::{Conversion, RgbScale, convert_text, parse_mixed_input};

use crate::cli::{Cli, Command, ConvertArgs, GradientArgs};
use crate::settings::Settings;

fn main() -> ExitCode {
    let cli = match cli::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("color-gradient-tool: {e}");
            eprintln!("try 'color-gradient-tool --help'");
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("color-gradient-tool: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Help => println!("{}", cli::USAGE),
        Command::Spaces => print!("{}", list_spaces()),
        Command::Gradient(args) => {
            for line in gradient(&args, Settings::load_or_default())? {
                println!("{line}");
            }
        }
        Command::Convert(args) => {
            let text = read_input(&args)?;
            let conversion = convert(&args, &text, Settings::load_or_default())?;
            print!("{}", format_conversion(&conversion));
        }
    }
    Ok(())
}

// ─── gradient ────────────────────────────────────────────────────────────────

fn gradient(args: &GradientArgs, mut settings: Settings) -> anyhow::Result<Vec<String>> {
    let space = args.space.unwrap_or(settings.space);
    let notation = args.format.unwrap_or(settings.notation);
    let steps = args.steps.unwrap_or(settings.step_count);
    let input = RgbScale::from_is_rgb256(args.input != Some(Notation::Rgb01));

    let base = match &args.ends {
        Some((a, b)) => {
            let a = read_seed(a, input).context("color A")?;
            let b = read_seed(b, input).context("color B")?;
            GradientRequest::new(SeedSet::two(a, b), Mode::TwoColor, steps)
        }
        None => settings.request()?.with_step_count(steps),
    };
    let request = match &args.center {
        Some(text) => {
            let c = read_seed(text, input).context("color C")?;
            GradientRequest {
                seeds: base.seeds.with(Role::C, c),
                mode: Mode::ThreeColor,
                ..base
            }
        }
        None => base,
    }
    .with_space(space)
    .with_notation(notation);

    let lines = GradientEngine::new().render(&request)?;

    if args.save {
        settings.space = space;
        settings.notation = notation;
        settings.step_count = steps;
        settings.three_color = request.mode == Mode::ThreeColor;
        for &role in request.mode.required() {
            let Some(hex) = request.seeds.get(role).map(ColorValue::to_hex) else {
                continue;
            };
            match role {
                Role::A => settings.color_a = hex,
                Role::B => settings.color_b = hex,
                Role::C => settings.color_c = hex,
            }
        }
        settings.save_to_default()?;
    }

    Ok(lines)
}

/// One seed color from an argument: hex, or an RGB triple in `scale`.
fn read_seed(text: &str, scale: RgbScale) -> anyhow::Result<ColorValue> {
    match parse_mixed_input(text, scale).as_slice() {
        [value] => Ok(*value),
        [] => bail!("cannot read {text:?} as a color"),
        many => bail!("expected one color, found {} in {text:?}", many.len()),
    }
}

// ─── convert ─────────────────────────────────────────────────────────────────

fn read_input(args: &ConvertArgs) -> anyhow::Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn convert(args: &ConvertArgs, text: &str, mut settings: Settings) -> anyhow::Result<Conversion> {
    let from = args.from.unwrap_or(settings.converter_from);
    let conversion = convert_text(text, from);
    if conversion.is_empty() {
        bail!("no readable {} colors in input", from.label());
    }

    if args.save {
        settings.converter_text = text.to_string();
        settings.converter_from = from;
        settings.save_to_default()?;
    }

    Ok(conversion)
}

/// Three labelled blocks, hex then RGB 256 then RGB 0–1.
fn format_conversion(conversion: &Conversion) -> String {
    Notation::ALL
        .iter()
        .map(|&notation| format!("{}\n{}\n", notation.label(), conversion.joined(notation)))
        .collect::<Vec<_>>()
        .join("\n")
}

// ─── spaces ──────────────────────────────────────────────────────────────────

fn list_spaces() -> String {
    ColorSpace::ALL
        .iter()
        .map(|space| format!("{:<12} {}\n", space.key(), space.label()))
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(a: &str, b: &str) -> GradientArgs {
        GradientArgs {
            ends: Some((a.into(), b.into())),
            ..GradientArgs::default()
        }
    }

    #[test]
    fn seeds_in_any_notation() {
        assert_eq!(read_seed("#FF0000", RgbScale::Byte).unwrap().to_hex(), "#ff0000");
        assert_eq!(read_seed("rgb(255, 0, 0)", RgbScale::Byte).unwrap().to_hex(), "#ff0000");
        assert_eq!(read_seed("1, 0, 0", RgbScale::Unit).unwrap().to_hex(), "#ff0000");
        assert!(read_seed("red", RgbScale::Byte).is_err());
        assert!(read_seed("#ff0000\n#00ff00", RgbScale::Byte).is_err());
    }

    #[test]
    fn seed_scale_is_independent_of_output_format() {
        // Unit RGB seeds with the default hex output.
        let a = GradientArgs {
            input: Some(Notation::Rgb01),
            steps: Some(2),
            ..args("0.5, 0.5, 0.5", "#fff000")
        };
        assert_eq!(
            gradient(&a, Settings::default()).unwrap(),
            ["#808080", "#fff000"]
        );

        // Byte RGB seeds with unit output.
        let b = GradientArgs {
            format: Some(Notation::Rgb01),
            steps: Some(2),
            ..args("255, 0, 0", "0, 0, 255")
        };
        assert_eq!(
            gradient(&b, Settings::default()).unwrap(),
            ["rgb(1.000, 0.000, 0.000)", "rgb(0.000, 0.000, 1.000)"]
        );
    }

    #[test]
    fn gradient_uses_settings_for_missing_flags() {
        let settings = Settings {
            step_count: 4,
            ..Settings::default()
        };
        let lines = gradient(&args("#000000", "#ffffff"), settings).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "#000000");
        assert_eq!(lines[3], "#ffffff");
    }

    #[test]
    fn gradient_flags_override_settings() {
        let a = GradientArgs {
            space: Some(ColorSpace::Srgb),
            format: Some(Notation::Rgb256),
            steps: Some(3),
            center: Some("#00ff00".into()),
            ..args("#ff0000", "#0000ff")
        };
        let lines = gradient(&a, Settings::default()).unwrap();
        assert_eq!(lines, ["rgb(255, 0, 0)", "rgb(0, 255, 0)", "rgb(0, 0, 255)"]);
    }

    #[test]
    fn gradient_without_colors_uses_stored_seeds() {
        let settings = Settings {
            color_a: "#000000".into(),
            color_b: "#ffffff".into(),
            color_c: "#ff0000".into(),
            three_color: true,
            step_count: 5,
            ..Settings::default()
        };
        let lines = gradient(&GradientArgs::default(), settings.clone()).unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#000000");
        assert_eq!(lines[2], "#ff0000");
        assert_eq!(lines[4], "#ffffff");

        // An explicit center on stored 2-color seeds switches to 3-color.
        let two = Settings {
            three_color: false,
            ..settings
        };
        let with_center = GradientArgs {
            center: Some("#00ff00".into()),
            steps: Some(3),
            ..GradientArgs::default()
        };
        assert_eq!(
            gradient(&with_center, two).unwrap(),
            ["#000000", "#00ff00", "#ffffff"]
        );
    }

    #[test]
    fn gradient_rejects_one_step() {
        let a = GradientArgs {
            steps: Some(1),
            ..args("#000000", "#ffffff")
        };
        let err = gradient(&a, Settings::default()).unwrap_err();
        assert_eq!(err.to_string(), "a gradient needs at least 2 steps, got 1");
    }

    #[test]
    fn convert_prints_three_blocks() {
        let conversion = convert(
            &ConvertArgs::default(),
            "#288ceb\n#9dda28",
            Settings::default(),
        )
        .unwrap();
        assert_eq!(
            format_conversion(&conversion),
            "Hex\n#288ceb\n#9dda28\n\n\
             RGB 256\n40, 140, 235\n157, 218, 40\n\n\
             RGB 0-1\n0.15686, 0.54902, 0.92157\n0.61569, 0.8549, 0.15686\n"
        );
    }

    #[test]
    fn convert_with_nothing_readable_fails() {
        assert!(convert(&ConvertArgs::default(), "nope", Settings::default()).is_err());
    }

    #[test]
    fn spaces_listing() {
        let listing = list_spaces();
        assert_eq!(listing.lines().count(), ColorSpace::ALL.len());
        assert!(listing.starts_with("oklch"));
    }
}
