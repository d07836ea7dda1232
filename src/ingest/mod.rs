pub mod table;

use crate::dates;
use crate::engine::rounds::is_round_complete;
use crate::error::{BagtagError, Result};
use crate::types::round::RoundRecord;
use std::path::Path;

/// Ingestion filters, mirroring what the presentation layer asks for.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Drop rounds that are not complete 18-hole scorecards. Par sentinel
    /// rows are always kept so the par index sees every course.
    pub filter_complete: bool,
    pub include_players: Option<Vec<String>>,
    pub exclude_players: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            filter_complete: true,
            include_players: None,
            exclude_players: Vec::new(),
        }
    }
}

pub fn load_rounds(path: &Path, options: &LoadOptions) -> Result<Vec<RoundRecord>> {
    if !path.exists() {
        return Err(BagtagError::DatasetNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    parse_rounds(&text, options)
}

pub fn parse_rounds(text: &str, options: &LoadOptions) -> Result<Vec<RoundRecord>> {
    let parsed = table::parse(text)?;
    let hole_columns = hole_column_count(parsed.headers());
    let mut rounds = Vec::new();
    for row in parsed.rows() {
        let record = to_record(&row, hole_columns);
        if let Some(include) = &options.include_players {
            if !include.iter().any(|name| name == &record.player) {
                continue;
            }
        }
        if options.exclude_players.iter().any(|name| name == &record.player) {
            continue;
        }
        if options.filter_complete && !record.is_par_row() && !is_round_complete(&record) {
            continue;
        }
        rounds.push(record);
    }
    tracing::debug!(rounds = rounds.len(), hole_columns, "loaded round dataset");
    Ok(rounds)
}

/// Highest N for which a `HoleN` column exists in the header.
fn hole_column_count(headers: &[String]) -> usize {
    headers
        .iter()
        .filter_map(|header| header.strip_prefix("Hole"))
        .filter_map(|suffix| suffix.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

fn to_record(row: &table::Row<'_>, hole_columns: usize) -> RoundRecord {
    let mut hole_scores = Vec::with_capacity(hole_columns);
    for hole in 1..=hole_columns {
        hole_scores.push(parse_int(row.get(&format!("Hole{hole}"))));
    }
    RoundRecord {
        player: row.get("PlayerName").trim().to_string(),
        course: row.get("CourseName").trim().to_string(),
        layout: row.get("LayoutName").trim().to_string(),
        started_at: dates::parse_start_timestamp(row.get("StartDate")),
        total: parse_int(row.get("Total")),
        plus_minus: parse_int(row.get("+/-")),
        rating: parse_int(row.get("RoundRating")),
        hole_scores,
    }
}

/// Missing or non-numeric values default to 0 rather than erroring.
fn parse_int(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}
