use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Select, Text};
use std::{fmt, process::ExitCode, sync::Arc};
use weather_core::{
    Config, Coordinate, Dashboard, DefaultLocation, LookupError, OverlayMode,
    provider::{device::FixedLocator, open_meteo::OpenMeteo},
    resolver::LocationResolver,
};

use crate::render::TerminalSink;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather, forecast and overlay for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,

        /// Overlay mode: temperature, wind or precipitation.
        #[arg(long)]
        mode: Option<OverlayMode>,
    },

    /// Show weather for the device position.
    Here {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long)]
        mode: Option<OverlayMode>,
    },

    /// Interactive dashboard: search cities and switch overlay modes.
    Dashboard,

    /// Set default city, overlay mode and request timeout.
    Configure,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Search,
    SwitchMode,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search for a city",
            Action::SwitchMode => "Switch overlay mode",
            Action::Quit => "Quit",
        })
    }
}

impl Cli {
    /// Lookup failures are rendered by the sink and reported through the exit
    /// code only; setup and prompt errors propagate.
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let mut config = Config::load()?;
        log::debug!("loaded configuration: {config:?}");

        match self.command {
            Command::Show { city, mode } => {
                if let Some(mode) = mode {
                    config.default_mode = mode;
                }
                let mut dash = Dashboard::from_config(&config, TerminalSink)?;
                return Ok(exit_code(dash.submit(&city).await));
            }
            Command::Here { lat, lon, mode } => {
                if let Some(mode) = mode {
                    config.default_mode = mode;
                }
                let here = Coordinate::new(lat, lon)?;
                let mut dash = Dashboard::from_config(&config, TerminalSink)?;
                return Ok(exit_code(dash.locate(&FixedLocator(here)).await));
            }
            Command::Dashboard => interactive(&config).await?,
            Command::Configure => configure(config).await?,
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn lookup_succeeded(result: &Result<(), LookupError>) -> bool {
    if let Err(err) = result {
        log::debug!("lookup ended with: {err}");
    }
    result.is_ok()
}

fn exit_code(result: Result<(), LookupError>) -> ExitCode {
    if lookup_succeeded(&result) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

fn mode_cursor(mode: OverlayMode) -> usize {
    OverlayMode::all().iter().position(|m| *m == mode).unwrap_or(0)
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let mut dash = Dashboard::from_config(config, TerminalSink)?;

    // Failures are already rendered; the session stays usable.
    let _ = dash.start().await;

    loop {
        let action = match Select::new(
            "What next?",
            vec![Action::Search, Action::SwitchMode, Action::Quit],
        )
        .prompt()
        {
            Ok(action) => action,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            Action::Search => match Text::new("City:").prompt() {
                Ok(city) => {
                    let _ = dash.submit(&city).await;
                }
                Err(err) if is_cancel(&err) => continue,
                Err(err) => return Err(err.into()),
            },
            Action::SwitchMode => {
                let current = dash.session().mode;
                match Select::new("Overlay mode:", OverlayMode::all().to_vec())
                    .with_starting_cursor(mode_cursor(current))
                    .prompt()
                {
                    Ok(mode) => dash.set_mode(mode),
                    Err(err) if is_cancel(&err) => continue,
                    Err(err) => return Err(err.into()),
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

async fn configure(mut config: Config) -> anyhow::Result<()> {
    let city = Text::new("Default city (leave empty to keep current):")
        .with_help_message(&format!("currently {}", config.default_location.name))
        .prompt()?;

    if !city.trim().is_empty() {
        let client = Arc::new(OpenMeteo::from_config(&config)?);
        let location = LocationResolver::new(client)
            .by_name(&city)
            .await
            .with_context(|| format!("Could not resolve '{}'", city.trim()))?;

        println!("Default location set to {}", location.display_name());
        config.default_location = DefaultLocation {
            name: location.name,
            country: location.country,
            latitude: location.coordinate.latitude,
            longitude: location.coordinate.longitude,
        };
    }

    config.default_mode = Select::new("Default overlay mode:", OverlayMode::all().to_vec())
        .with_starting_cursor(mode_cursor(config.default_mode))
        .prompt()?;

    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
