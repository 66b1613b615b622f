use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::{CategorySummary, ScoreRating, WalkabilityResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a distance for display: "850 m" below 1 km, "1.2 km" above
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        let formatted = format!("{:.1} km", meters / 1000.0);
        formatted.replace(".0 km", " km")
    } else {
        format!("{:.0} m", meters)
    }
}

/// Format a score with its rating band, e.g. " 72/100  Very good"
pub fn format_score(score: u8, use_colors: bool) -> String {
    let rating = ScoreRating::from_score(score);
    let number = format!("{:>3}/100", score);
    if !use_colors {
        return format!("{}  {}", number, rating);
    }
    match rating {
        ScoreRating::Excellent | ScoreRating::VeryGood => format!("{}  {}", number.green().bold(), rating),
        ScoreRating::Fair => format!("{}  {}", number.yellow().bold(), rating),
        ScoreRating::Limited | ScoreRating::Minimal => {
            format!("{}  {}", number.red().bold(), rating)
        }
    }
}

fn format_category_line(summary: &CategorySummary) -> String {
    let distance = if summary.count == 0 {
        "-".to_string()
    } else {
        format!("avg {}", format_distance(summary.average_distance_meters))
    };
    let marker = if summary.category.is_scored() { "" } else { " (not scored)" };
    format!(
        "    {:<12}{:>4}  {}{}",
        summary.category.label(),
        summary.count,
        distance,
        marker
    )
}

/// Format a scoring result as a multi-line report
pub fn format_result(result: &WalkabilityResult, address: &str, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let heading = match result.coordinate {
        Some(c) if address.trim().is_empty() => format!("({:.5}, {:.5})", c.latitude, c.longitude),
        Some(c) => format!("{} ({:.5}, {:.5})", address.trim(), c.latitude, c.longitude),
        None => address.trim().to_string(),
    };
    if use_colors {
        lines.push(heading.bold().to_string());
    } else {
        lines.push(heading);
    }

    if let Some(error) = &result.error {
        let message = format!("Scores unavailable: {}", error);
        if use_colors {
            lines.push(message.red().to_string());
        } else {
            lines.push(message);
        }
        return lines.join("\n");
    }

    lines.push(format!("  Walk:     {}", format_score(result.walk_score, use_colors)));
    lines.push(format!("  Transit:  {}", format_score(result.transit_score, use_colors)));
    lines.push(format!("  Bike:     {}", format_score(result.bike_score, use_colors)));
    lines.push(format!(
        "  {}",
        ScoreRating::from_score(result.walk_score).description()
    ));

    lines.push(String::new());
    lines.push("  Amenities:".to_string());
    for summary in &result.breakdown.categories {
        let line = format_category_line(summary);
        if use_colors && summary.count == 0 {
            lines.push(line.dimmed().to_string());
        } else {
            lines.push(line);
        }
    }
    lines.push(format!(
        "  Transit stops: {}",
        result.breakdown.transit_stop_count
    ));
    lines.push(format!(
        "  Bike features: {}",
        result.breakdown.bike_feature_count
    ));

    lines.join("\n")
}

/// Serialize a result as pretty-printed JSON
pub fn format_json(result: &WalkabilityResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result as JSON")
}
