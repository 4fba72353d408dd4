//! Hearth CLI
//!
//! Command-line front end for the theme engine:
//!
//! - `hearth compile <theme>`: compile a theme to CSS variables or JSON
//! - `hearth resolve <theme> <element>`: show one element's cascaded style
//! - `hearth effects <raw>`: derive effect classes from raw style text
//! - `hearth opacity <color> <opacity>`: run the color compositor
//! - `hearth presets`: list built-in palette presets

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use hearth_theme::ColorMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "HEARTH_LOG";

/// Theme engine for the Hearth household app
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(about = "Compile and inspect Hearth themes")]
#[command(version)]
struct Cli {
    /// Engine settings file (defaults to ./hearth.toml if present)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a theme to style variables
    Compile {
        /// Theme file (.toml or .json)
        theme: PathBuf,

        /// Color mode (defaults to the settings' default mode)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// User accent color
        #[arg(short, long, default_value = "")]
        accent: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Css)]
        format: Format,
    },

    /// Show the cascaded style of one element
    Resolve {
        /// Theme file (.toml or .json)
        theme: PathBuf,

        /// Element key, e.g. `dashboard-card`
        element: String,

        #[arg(short, long)]
        mode: Option<Mode>,
    },

    /// Derive presentation classes from raw style text
    Effects {
        /// Raw style text, e.g. "matrix-rain: true; matrix-rain-speed: fast"
        raw: String,
    },

    /// Apply an opacity to a color
    Opacity {
        color: String,

        /// Opacity in [0, 1]
        #[arg(allow_hyphen_values = true)]
        opacity: String,
    },

    /// List built-in palette presets
    Presets,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Light,
    Dark,
}

impl From<Mode> for ColorMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Light => ColorMode::Light,
            Mode::Dark => ColorMode::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Css,
    Json,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::Compile {
            theme,
            mode,
            accent,
            format,
        } => {
            let settings = config::load_settings(cli.settings.as_deref())?;
            let mode = mode.map(ColorMode::from).unwrap_or(settings.default_mode);
            commands::compile(&theme, mode, &accent, format == Format::Json)?
        }
        Command::Resolve {
            theme,
            element,
            mode,
        } => {
            let settings = config::load_settings(cli.settings.as_deref())?;
            let mode = mode.map(ColorMode::from).unwrap_or(settings.default_mode);
            commands::resolve(&theme, &element, mode)?
        }
        Command::Effects { raw } => commands::effects(&raw),
        Command::Opacity { color, opacity } => commands::opacity(&color, &opacity)?,
        Command::Presets => commands::presets(),
    };

    println!("{output}");
    Ok(())
}
