mod display;
mod import;
mod profile;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lucky_db::dataset::HistoryDataset;
use lucky_db::models::DrawResult;
use lucky_db::registry::LotteryRegistry;
use lucky_engine::analysis::frequency::{latest_results, mean_occurrences};
use lucky_engine::analysis::{advise, analyze, cold_numbers, hot_numbers};
use lucky_engine::gaming::{SpendingStatus, pick_message};
use lucky_engine::generator::{NumberGenerator, Strategy};

use crate::display::{
    display_analysis, display_budget, display_combination, display_frequencies, display_hot_cold,
    display_import_summary, display_lotteries, display_next_draw, display_odds, display_results,
};
use crate::profile::load_profile;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ModeArg {
    #[default]
    Numerology,
    Random,
    Custom,
}

#[derive(Parser)]
#[command(name = "lucky", about = "Générateur de combinaisons et statistiques de loterie")]
struct Cli {
    /// Profil joueur (JSON) ; profil de démonstration par défaut
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Table des loteries (JSON) remplaçant la table intégrée
    #[arg(long, global = true)]
    lotteries: Option<PathBuf>,

    /// Historique CSV (date;numéros;bonus;jackpot) de la loterie choisie
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les loteries disponibles
    Lotteries,

    /// Générer une combinaison
    Generate {
        /// Identifiant de la loterie
        #[arg(short, long, default_value = "euromillions")]
        lottery: String,

        /// Mode de génération
        #[arg(short, long, default_value = "numerology")]
        mode: ModeArg,

        /// Numéros choisis, séparés par des virgules (mode custom)
        #[arg(short, long)]
        numbers: Option<String>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Analyser une combinaison face à l'historique
    Analyze {
        /// Identifiant de la loterie
        #[arg(short, long, default_value = "euromillions")]
        lottery: String,

        /// Numéros séparés par des virgules
        numbers: String,
    },

    /// Fréquences, numéros chauds et froids
    Stats {
        /// Identifiant de la loterie
        #[arg(short, long, default_value = "euromillions")]
        lottery: String,

        /// Taille des listes chaudes/froides
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Derniers tirages
    History {
        /// Identifiant de la loterie
        #[arg(short, long, default_value = "euromillions")]
        lottery: String,

        /// Nombre de tirages à afficher
        #[arg(short = 'n', long, default_value = "5")]
        last: usize,
    },

    /// Budget mensuel et probabilités de jackpot
    Budget,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let registry = load_registry(cli.lotteries.as_deref())?;
    let history = cli.history.as_deref();

    match cli.command {
        Command::Lotteries => {
            let dataset = HistoryDataset::builtin();
            display_lotteries(&registry, &dataset);
            Ok(())
        }
        Command::Generate {
            lottery,
            mode,
            numbers,
            seed,
        } => cmd_generate(&registry, history, cli.profile.as_deref(), &lottery, mode, numbers, seed),
        Command::Analyze { lottery, numbers } => cmd_analyze(&registry, history, &lottery, &numbers),
        Command::Stats { lottery, top } => cmd_stats(&registry, history, &lottery, top),
        Command::History { lottery, last } => cmd_history(&registry, history, &lottery, last),
        Command::Budget => cmd_budget(&registry, cli.profile.as_deref()),
    }
}

fn load_registry(path: Option<&Path>) -> Result<LotteryRegistry> {
    let Some(path) = path else {
        return Ok(LotteryRegistry::builtin());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    LotteryRegistry::from_json(&json)
        .with_context(|| format!("Table des loteries invalide dans {:?}", path))
}

/// Historique intégré, ou celui du fichier CSV pour la loterie demandée.
fn load_dataset(registry: &LotteryRegistry, history: Option<&Path>, lottery: &str) -> Result<HistoryDataset> {
    let mut dataset = HistoryDataset::builtin();
    if let Some(path) = history {
        let config = registry.lookup(lottery)?;
        let result = import::import_csv(path, config)?;
        display_import_summary(&result);
        dataset.insert(lottery, result.results);
    }
    Ok(dataset)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn cmd_generate(
    registry: &LotteryRegistry,
    history: Option<&Path>,
    profile_path: Option<&Path>,
    lottery: &str,
    mode: ModeArg,
    numbers: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let profile = load_profile(profile_path)?;
    let generator = NumberGenerator::new(registry);
    let config = generator.config(lottery)?;
    let mut rng = make_rng(seed);

    let strategy = match mode {
        ModeArg::Numerology => Strategy::Numerology(&profile),
        ModeArg::Random => Strategy::Random,
        ModeArg::Custom => Strategy::Custom(
            numbers
                .as_deref()
                .context("Le mode custom exige --numbers \"7,14,21,28,35\"")?,
        ),
    };
    let combination = generator.generate(lottery, strategy, &mut rng)?;
    display_combination(config, &combination);

    let dataset = load_dataset(registry, history, lottery)?;
    let analysis = advise(&combination.main_numbers, dataset.results(lottery));
    display_analysis(&analysis, combination.main_numbers.len());

    println!("\n💡 {}", pick_message(&mut rng));
    Ok(())
}

fn cmd_analyze(registry: &LotteryRegistry, history: Option<&Path>, lottery: &str, numbers: &str) -> Result<()> {
    let generator = NumberGenerator::new(registry);
    let main_numbers = generator.custom(lottery, numbers)?;
    let dataset = load_dataset(registry, history, lottery)?;
    let analysis = advise(&main_numbers, dataset.results(lottery));
    display_analysis(&analysis, main_numbers.len());
    Ok(())
}

fn lottery_results(registry: &LotteryRegistry, history: Option<&Path>, lottery: &str) -> Result<(HistoryDataset, Vec<DrawResult>)> {
    registry.lookup(lottery)?;
    let dataset = load_dataset(registry, history, lottery)?;
    let results = dataset.results(lottery).to_vec();
    Ok((dataset, results))
}

fn cmd_stats(registry: &LotteryRegistry, history: Option<&Path>, lottery: &str, top: usize) -> Result<()> {
    let (dataset, results) = lottery_results(registry, history, lottery)?;
    let today = chrono::Local::now().date_naive();

    let entries = analyze(&results);
    println!("\n📊 Fréquences sur {} tirages\n", results.len());
    display_frequencies(&entries, today);
    display_hot_cold(
        &hot_numbers(&results, top),
        &cold_numbers(&results, top),
        mean_occurrences(&entries),
    );
    display_next_draw(dataset.next_draw(lottery));
    Ok(())
}

fn cmd_history(registry: &LotteryRegistry, history: Option<&Path>, lottery: &str, last: usize) -> Result<()> {
    let (dataset, results) = lottery_results(registry, history, lottery)?;
    display_results(&latest_results(&results, last));
    display_next_draw(dataset.next_draw(lottery));
    Ok(())
}

fn cmd_budget(registry: &LotteryRegistry, profile_path: Option<&Path>) -> Result<()> {
    let profile = load_profile(profile_path)?;
    println!("\n💶 Budget de {}\n", profile.name);
    display_budget(&SpendingStatus::from_profile(&profile));

    let configs: Vec<_> = profile
        .preferred_lotteries
        .iter()
        .filter_map(|id| {
            let config = registry.get(id);
            if config.is_none() {
                log::warn!("Loterie préférée inconnue ignorée : {}", id);
            }
            config
        })
        .collect();
    if !configs.is_empty() {
        println!();
        display_odds(&configs);
    }
    Ok(())
}
