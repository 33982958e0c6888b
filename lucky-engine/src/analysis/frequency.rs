use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;

use lucky_db::models::{DrawResult, FrequencyEntry};

use crate::error::{EngineError, Result};

/// Occurrences des numéros principaux (les bonus sont exclus) avec la date
/// de dernière apparition. Trié par occurrences décroissantes, puis par
/// numéro croissant en cas d'égalité.
pub fn analyze(results: &[DrawResult]) -> Vec<FrequencyEntry> {
    let mut by_number: HashMap<u8, FrequencyEntry> = HashMap::new();

    for result in results {
        for &n in &result.numbers {
            let entry = by_number.entry(n).or_insert_with(|| FrequencyEntry {
                number: n,
                occurrences: 0,
                last_seen: result.date.clone(),
            });
            entry.occurrences += 1;
            // Dates ISO : l'ordre lexicographique est l'ordre chronologique
            if result.date > entry.last_seen {
                entry.last_seen = result.date.clone();
            }
        }
    }

    let mut entries: Vec<FrequencyEntry> = by_number.into_values().collect();
    entries.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then(a.number.cmp(&b.number))
    });
    debug!("{} tirages, {} numéros distincts", results.len(), entries.len());
    entries
}

/// Les `n` numéros les plus fréquents.
pub fn hot_numbers(results: &[DrawResult], n: usize) -> Vec<u8> {
    analyze(results).iter().take(n).map(|e| e.number).collect()
}

/// Les `n` numéros les moins fréquents, le plus rare en premier.
pub fn cold_numbers(results: &[DrawResult], n: usize) -> Vec<u8> {
    analyze(results).iter().rev().take(n).map(|e| e.number).collect()
}

/// Moyenne des occurrences ; 0 sur une liste vide.
pub fn mean_occurrences(entries: &[FrequencyEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let total: u32 = entries.iter().map(|e| e.occurrences).sum();
    total as f64 / entries.len() as f64
}

/// Les `n` tirages les plus récents, du plus récent au plus ancien.
pub fn latest_results(results: &[DrawResult], n: usize) -> Vec<DrawResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(date.to_string()))
}

/// Nombre de jours (absolu) entre `date` et la date de référence fournie
/// par l'appelant.
pub fn days_since(date: &str, now: NaiveDate) -> Result<i64> {
    let then = parse_date(date)?;
    Ok((now - then).num_days().abs())
}
