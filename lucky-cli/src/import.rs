use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use lucky_db::models::{DrawResult, LotteryConfig};

pub fn parse_french_decimal(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let normalized = s.replace(' ', "").replace(',', ".");
    normalized
        .parse::<f64>()
        .with_context(|| format!("Impossible de parser le nombre: '{}'", s))
}

/// Accepte `AAAA-MM-JJ` ou `JJ/MM/AAAA` et renvoie toujours `AAAA-MM-JJ`,
/// seul format dont l'ordre lexicographique suit la chronologie.
fn parse_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn parse_numbers(field: &str) -> Result<Vec<u8>> {
    field
        .split_whitespace()
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Impossible de parser '{}'", s))
        })
        .collect()
}

fn field(record: &csv::StringRecord, idx: usize) -> Result<&str> {
    record
        .get(idx)
        .map(str::trim)
        .with_context(|| format!("Champ manquant à l'index {}", idx))
}

/// Ligne attendue : `date;numéros;bonus;jackpot`, numéros séparés par des espaces.
fn parse_record(record: &csv::StringRecord) -> Result<DrawResult> {
    let date = parse_date(field(record, 0)?)?;
    let mut numbers = parse_numbers(field(record, 1)?)?;
    numbers.sort_unstable();
    let mut bonus_numbers = parse_numbers(record.get(2).unwrap_or_default())?;
    bonus_numbers.sort_unstable();
    let jackpot = parse_french_decimal(record.get(3).unwrap_or_default())?;

    Ok(DrawResult {
        date,
        numbers,
        bonus_numbers,
        jackpot,
    })
}

pub struct ImportResult {
    pub results: Vec<DrawResult>,
    pub total_records: u32,
    pub errors: u32,
}

/// Lit un historique CSV en mémoire ; les lignes invalides sont comptées et
/// ignorées.
pub fn import_csv(path: &Path, config: &LotteryConfig) -> Result<ImportResult> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    import_from_reader(reader, config)
}

fn import_from_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    config: &LotteryConfig,
) -> Result<ImportResult> {
    let mut result = ImportResult {
        results: Vec::new(),
        total_records: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        let parsed = record_result
            .context("Erreur de lecture")
            .and_then(|record| parse_record(&record))
            .and_then(|draw| {
                draw.validate(config)?;
                Ok(draw)
            });
        match parsed {
            Ok(draw) => result.results.push(draw),
            Err(e) => {
                log::warn!("Ligne {} ignorée : {:#}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    log::info!(
        "{} tirages importés pour {} ({} erreurs)",
        result.results.len(),
        config.id,
        result.errors
    );
    Ok(result)
}
