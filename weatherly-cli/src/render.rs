//! Text rendering of a weather bundle. Stands in for the visual dashboard;
//! all values come from the core's models and derivations.

use chrono::{DateTime, Utc};

use weatherly_core::derive::{self, Activity};
use weatherly_core::model::{DailyProvenance, Units, WeatherBundle, WeatherSnapshot};

pub fn dashboard(bundle: &WeatherBundle, is_favorite: bool) {
    let snapshot = &bundle.snapshot;
    let unit = bundle.units.symbol();
    let star = if is_favorite { "★" } else { "☆" };

    println!("{} {}", snapshot.location.identity(), star);
    println!(
        "{} — {:.0}°{unit} (feels like {:.0}°{unit})",
        snapshot.description, snapshot.temperature, snapshot.feels_like
    );
    println!("min {:.0}°{unit} / max {:.0}°{unit}", snapshot.temp_min, snapshot.temp_max);
    println!();

    println!("humidity    {}%", snapshot.humidity);
    println!(
        "wind        {:.1} m/s {} ({:.0}°)",
        snapshot.wind.speed,
        derive::wind_compass(snapshot.wind.degrees),
        snapshot.wind.degrees
    );
    match bundle.uv_index_max {
        Some(uv) => println!("uv index    {uv:.1}"),
        None => println!("uv index    -"),
    }
    println!("pressure    {} hPa", snapshot.pressure);
    if let Some(visibility) = snapshot.visibility_m {
        println!("visibility  {:.1} km", f64::from(visibility) / 1000.0);
    }
    println!("sunrise     {}", clock(snapshot.sunrise));
    println!("sunset      {}", clock(snapshot.sunset));
    println!("daylight    {}", derive::daylight_duration(snapshot.sunrise, snapshot.sunset));

    if let Some(air) = bundle.air_quality {
        let band = derive::aqi_band(air.aqi);
        println!("air quality {} ({}/5)", band.label(), air.aqi);
    }

    if let Some(lunar) = &bundle.lunar {
        let phase = derive::moon_phase(lunar.phase);
        print!("moon        {} {}", phase.glyph(), phase.label());
        if let Some(moonrise) = lunar.moonrise {
            print!(", rise {}", moonrise.format("%H:%M"));
        }
        if let Some(moonset) = lunar.moonset {
            print!(", set {}", moonset.format("%H:%M"));
        }
        println!();
    }

    println!();
    activities(snapshot);
    clothing(bundle);
    hourly(bundle);
    daily(bundle);
}

/// Compact one-line card for the capital and major-city tiles.
pub fn tile(snapshot: &WeatherSnapshot, units: Units) {
    println!(
        "{:24} {:.0}°{} — {}",
        snapshot.location.identity(),
        snapshot.temperature,
        units.symbol(),
        snapshot.description
    );
}

fn activities(snapshot: &WeatherSnapshot) {
    println!("activities:");
    for activity in Activity::all() {
        let suitable = activity.is_suitable(snapshot.condition, snapshot.temperature);
        let mark = if suitable { "✓" } else { "✗" };
        println!("  {mark} {}", activity.label());
    }
    println!();
}

fn clothing(bundle: &WeatherBundle) {
    let items = derive::clothing_suggestions(
        bundle.snapshot.temperature,
        bundle.snapshot.condition,
        bundle.uv_index_max,
    );
    let labels: Vec<&str> = items.iter().map(|item| item.label()).collect();
    println!("clothing: {}", labels.join(", "));
    println!();
}

fn hourly(bundle: &WeatherBundle) {
    let points = derive::hourly_points(&bundle.hourly, None);
    if points.is_empty() {
        return;
    }

    println!("next hours:");
    for point in points {
        println!(
            "  {}  {:>5.1}°{}",
            point.time.format("%a %H:%M"),
            point.temperature,
            bundle.units.symbol()
        );
    }
    println!();
}

fn daily(bundle: &WeatherBundle) {
    match bundle.daily.provenance {
        DailyProvenance::Native => println!("10-day forecast:"),
        DailyProvenance::Fallback => println!("daily forecast (reduced, 5-day source):"),
    }

    for entry in &bundle.daily.entries {
        let unit = bundle.units.symbol();
        print!(
            "  {}  {:>4.0}°{unit} / {:>4.0}°{unit}  [{}]",
            entry.date.format("%a %d %b"),
            entry.temp_max,
            entry.temp_min,
            entry.icon
        );
        if let Some(chance) = entry.precipitation_chance {
            print!("  {chance:.0}%");
        }
        if let Some(description) = &entry.description {
            print!("  {description}");
        }
        println!();
    }
}

fn clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}
