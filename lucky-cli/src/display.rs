use chrono::NaiveDate;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use lucky_db::dataset::HistoryDataset;
use lucky_db::models::{
    CombinationAnalysis, DrawResult, FrequencyEntry, GeneratedCombination, LotteryConfig,
    NextDraw, RiskTier,
};
use lucky_db::registry::LotteryRegistry;
use lucky_engine::analysis::days_since;
use lucky_engine::gaming::{BudgetLevel, SpendingStatus, jackpot_combinations, jackpot_odds_percent};

use crate::import::ImportResult;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn join_numbers(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        return "—".to_string();
    }
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn format_euros(amount: f64) -> String {
    if amount > 0.0 {
        format!("{:.0} €", amount)
    } else {
        "—".to_string()
    }
}

pub fn display_lotteries(registry: &LotteryRegistry, dataset: &HistoryDataset) {
    let mut table = new_table(vec!["Id", "Loterie", "Numéros", "Bonus", "Tirages connus"]);
    for config in registry.iter() {
        let bonus = if config.has_bonus() {
            format!("{} parmi 1-{}", config.bonus_count, config.max_bonus)
        } else {
            "—".to_string()
        };
        table.add_row(vec![
            config.id.clone(),
            config.display_name.clone(),
            format!("{} parmi 1-{}", config.total_numbers, config.max_number),
            bonus,
            dataset.count(&config.id).to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_combination(config: &LotteryConfig, combination: &GeneratedCombination) {
    println!("\n🎲 {} — mode {}\n", config.display_name, combination.mode);
    let mut table = new_table(vec!["Numéros", "Bonus"]);
    table.add_row(vec![
        join_numbers(&combination.main_numbers),
        join_numbers(&combination.bonus_numbers),
    ]);
    println!("{table}");
}

pub fn display_analysis(analysis: &CombinationAnalysis, total: usize) {
    println!("\n📊 Analyse de la combinaison\n");
    let color = match analysis.risk_tier {
        RiskTier::High => Color::Red,
        RiskTier::Medium => Color::Yellow,
        RiskTier::Low => Color::Cyan,
    };
    let mut table = new_table(vec!["Chauds", "Froids", "Fréquence moyenne", "Profil"]);
    table.add_row(vec![
        Cell::new(format!("{} sur {}", analysis.hot_count, total)),
        Cell::new(format!("{} sur {}", analysis.cold_count, total)),
        Cell::new(format!("{:.2}", analysis.average_frequency)),
        Cell::new(analysis.risk_tier.to_string()).fg(color),
    ]);
    println!("{table}");
    println!("{}", analysis.message);
}

pub fn display_frequencies(entries: &[FrequencyEntry], today: NaiveDate) {
    if entries.is_empty() {
        println!("Aucun historique pour cette loterie.");
        return;
    }
    let mut table = new_table(vec!["Numéro", "Sorties", "Dernière sortie", "Il y a"]);
    for entry in entries {
        let ago = match days_since(&entry.last_seen, today) {
            Ok(days) => format!("{} jours", days),
            Err(_) => "?".to_string(),
        };
        table.add_row(vec![
            format!("{:2}", entry.number),
            entry.occurrences.to_string(),
            entry.last_seen.clone(),
            ago,
        ]);
    }
    println!("{table}");
}

pub fn display_hot_cold(hot: &[u8], cold: &[u8], mean: f64) {
    println!("\n🔥 Chauds : {}", join_numbers(hot));
    println!("❄️  Froids : {}", join_numbers(cold));
    println!("Sorties moyennes par numéro : {:.1}", mean);
}

pub fn display_next_draw(next: Option<&NextDraw>) {
    match next {
        Some(next) => println!(
            "\nProchain tirage : {} (jackpot {})",
            next.date_time,
            format_euros(next.jackpot)
        ),
        None => println!("\nProchain tirage : à déterminer"),
    }
}

pub fn display_results(results: &[DrawResult]) {
    if results.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }
    let mut table = new_table(vec!["Date", "Numéros", "Bonus", "Jackpot"]);
    for result in results {
        table.add_row(vec![
            result.date.clone(),
            join_numbers(&result.numbers),
            join_numbers(&result.bonus_numbers),
            format_euros(result.jackpot),
        ]);
    }
    println!("{table}");
}

pub fn display_budget(status: &SpendingStatus) {
    let color = match status.level {
        BudgetLevel::Comfortable => Color::Green,
        BudgetLevel::Caution => Color::Yellow,
        BudgetLevel::Warning => Color::Red,
    };
    let mut table = new_table(vec!["Dépensé", "Limite mensuelle", "Utilisé", "Reste", "État"]);
    table.add_row(vec![
        Cell::new(format!("{:.2} €", status.spent)),
        Cell::new(format!("{:.2} €", status.limit)),
        Cell::new(format!("{:.1} %", status.percentage)),
        Cell::new(format!("{:.2} €", status.remaining())),
        Cell::new(status.level.to_string()).fg(color),
    ]);
    println!("{table}");
    if status.level == BudgetLevel::Warning {
        println!("⚠️  Vous approchez de votre limite mensuelle. Pensez à faire une pause.");
    }
}

pub fn display_odds(configs: &[&LotteryConfig]) {
    let mut table = new_table(vec!["Loterie", "Grilles possibles", "Chance de jackpot"]);
    for config in configs {
        let combinations = jackpot_combinations(config)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            config.display_name.clone(),
            combinations,
            format!("{:.10} %", jackpot_odds_percent(config)),
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Historique importé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Tirages retenus   : {}", result.results.len());
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}
