use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};

use weatherly_core::capability::{self, GeoLocator, SpeechCapture};
use weatherly_core::model::{Locale, Units, WORLD_CAPITALS};
use weatherly_core::{
    Aggregator, Config, GeoResolver, OpenMeteoClient, OpenWeatherClient, WeatherError,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherly", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard for a place.
    Show {
        /// City name or `"Name, CC"` query. Without it, falls back to the
        /// default start location.
        query: Option<String>,

        /// Treat the query as a raw voice transcript (punctuation is
        /// stripped before searching).
        #[arg(long)]
        spoken: bool,

        /// Unit system override for this invocation: metric or imperial.
        #[arg(long)]
        unit: Option<String>,

        /// Locale override for this invocation, e.g. "en" or "tr".
        #[arg(long)]
        locale: Option<String>,
    },

    /// List location suggestions for a partial query.
    Suggest {
        /// Partial city name, e.g. "Lon".
        query: String,
    },

    /// Weather tiles for the world capitals.
    Capitals,

    /// Weather tiles for the active locale's major cities.
    Cities,

    /// Manage favorite places.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Interactive configuration: API key, language, units.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Print the favorites in saved order.
    List,
    /// Resolve a query and star the best match.
    Add { query: String },
    /// Unstar a saved identity, e.g. "London, GB".
    Remove { identity: String },
}

/// The transcript was already produced by an external speech engine and
/// handed to us as an argument.
struct ArgTranscript(String);

#[async_trait]
impl SpeechCapture for ArgTranscript {
    async fn listen(&self, _locale_tag: &str) -> Result<String, WeatherError> {
        Ok(self.0.clone())
    }
}

/// Terminals have no position service; the startup fallback applies.
struct NoGeolocation;

#[async_trait]
impl GeoLocator for NoGeolocation {
    async fn current_position(&self) -> Result<(f64, f64), WeatherError> {
        Err(WeatherError::CapabilityUnavailable { capability: "geolocation" })
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { query, spoken, unit, locale } => {
                show(query, spoken, unit, locale).await
            }
            Command::Suggest { query } => suggest(query).await,
            Command::Capitals => tiles(WORLD_CAPITALS).await,
            Command::Cities => {
                let config = Config::load()?;
                tiles(config.locale().major_cities()).await
            }
            Command::Favorites { action } => favorites(action).await,
            Command::Configure => configure(),
        }
    }
}

fn clients(config: &Config) -> anyhow::Result<(OpenWeatherClient, GeoResolver, Aggregator)> {
    let weather = OpenWeatherClient::new(config.api_key()?.to_string());
    let resolver = GeoResolver::new(weather.clone());
    let aggregator = Aggregator::new(weather.clone(), OpenMeteoClient::new());
    Ok((weather, resolver, aggregator))
}

async fn show(
    query: Option<String>,
    spoken: bool,
    unit: Option<String>,
    locale: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let locale = match locale {
        Some(code) => Locale::try_from(code.as_str())?,
        None => config.locale(),
    };
    let units = match unit {
        Some(value) => Units::try_from(value.as_str())?,
        None => config.units(),
    };

    let (_, resolver, aggregator) = clients(&config)?;

    let query = match query {
        Some(raw) if spoken => capability::spoken_query(&ArgTranscript(raw), locale).await?,
        Some(raw) => raw,
        None => match capability::startup_location(&NoGeolocation).await {
            capability::StartLocation::Coordinates { lat, lon } => {
                let bundle =
                    aggregator.load_weather(lat, lon, Some("My Location"), units, locale).await?;
                render::dashboard(&bundle, config.is_favorite(&bundle.snapshot.location.identity()));
                return Ok(());
            }
            capability::StartLocation::DefaultQuery(default) => default.to_string(),
        },
    };

    let candidates = resolver.resolve(&query, locale).await?;
    let best = &candidates[0];

    let bundle =
        aggregator.load_weather(best.lat, best.lon, Some(&best.name), units, locale).await?;
    render::dashboard(&bundle, config.is_favorite(&bundle.snapshot.location.identity()));

    Ok(())
}

async fn suggest(query: String) -> anyhow::Result<()> {
    let config = Config::load()?;
    let (_, resolver, _) = clients(&config)?;

    let service = weatherly_core::SuggestionService::new(resolver);
    let generation = service.begin();

    match service.fetch(generation, &query, config.locale()).await {
        Some(candidates) if candidates.is_empty() => println!("No matches for '{query}'."),
        Some(candidates) => {
            for candidate in candidates {
                match &candidate.state {
                    Some(state) => {
                        println!("{} — {}, {}", candidate.name, state, candidate.country);
                    }
                    None => println!("{} — {}", candidate.name, candidate.country),
                }
            }
        }
        // A single-shot CLI query cannot be superseded.
        None => {}
    }

    Ok(())
}

async fn tiles(names: &[&str]) -> anyhow::Result<()> {
    let config = Config::load()?;
    let locale = config.locale();
    let units = config.units();
    let (weather, _, _) = clients(&config)?;

    for name in names {
        match weather.fetch_current_by_name(name, units, locale).await {
            Ok(snapshot) => render::tile(&snapshot, units),
            // A tile that cannot load is skipped, like the reference UI's
            // placeholder cards.
            Err(err) => tracing::warn!("tile for {name} unavailable: {err}"),
        }
    }

    Ok(())
}

async fn favorites(action: FavoritesCommand) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    match action {
        FavoritesCommand::List => {
            if config.favorites.is_empty() {
                println!("No favorites saved yet.");
            }
            for favorite in &config.favorites {
                println!("★ {favorite}");
            }
        }
        FavoritesCommand::Add { query } => {
            let (_, resolver, _) = clients(&config)?;
            let candidates = resolver.resolve(&query, config.locale()).await?;
            let identity = candidates[0].identity();

            config.add_favorite(&identity);
            config.save()?;
            println!("Starred {identity}.");
        }
        FavoritesCommand::Remove { identity } => {
            config.remove_favorite(&identity);
            config.save()?;
            println!("Removed {identity}.");
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("Configuration aborted")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let locale_names: Vec<&str> = Locale::all().iter().map(|l| l.as_str()).collect();
    let locale = inquire::Select::new("Language:", locale_names)
        .prompt()
        .context("Configuration aborted")?;
    let locale = Locale::try_from(locale)?;
    config.set_locale(locale);

    let units = inquire::Select::new("Units:", vec!["metric", "imperial"])
        .with_help_message(&format!("default for '{locale}' is {}", locale.default_units()))
        .prompt()
        .context("Configuration aborted")?;
    config.set_units(Units::try_from(units)?);

    config.save()?;
    println!("Saved to {}.", Config::config_file_path()?.display());

    Ok(())
}
