use lucky_db::models::{CombinationAnalysis, DrawResult, RiskTier};

use super::frequency::{analyze, cold_numbers, hot_numbers};

/// Taille des listes chaudes/froides comparées à la combinaison.
pub const HOT_COLD_WINDOW: usize = 10;

/// Seuil à partir duquel une combinaison est jugée orientée chaud ou froid.
pub const BIAS_THRESHOLD: usize = 3;

const HIGH_MESSAGE: &str = "Vous avez beaucoup de numéros « chauds ». \
    Cela n'augmente en rien vos chances de gagner.";
const LOW_MESSAGE: &str = "Vous avez plusieurs numéros « froids ». Certains joueurs pensent \
    qu'ils « doivent » sortir, mais chaque tirage est indépendant.";
const MEDIUM_MESSAGE: &str = "Vous avez un mélange équilibré de numéros. \
    Toutes les combinaisons ont la même probabilité.";

/// Classe une combinaison selon son recouvrement avec les numéros chauds
/// et froids de l'historique.
///
/// L'ordre d'évaluation est fixe : le biais chaud est testé avant le biais
/// froid, une combinaison à la fois chaude et froide est donc `High`.
pub fn advise(main_numbers: &[u8], results: &[DrawResult]) -> CombinationAnalysis {
    let hot = hot_numbers(results, HOT_COLD_WINDOW);
    let cold = cold_numbers(results, HOT_COLD_WINDOW);
    let entries = analyze(results);

    let hot_count = main_numbers.iter().filter(|n| hot.contains(n)).count();
    let cold_count = main_numbers.iter().filter(|n| cold.contains(n)).count();

    let average_frequency = if main_numbers.is_empty() {
        0.0
    } else {
        let total: u32 = main_numbers
            .iter()
            .map(|&n| {
                entries
                    .iter()
                    .find(|e| e.number == n)
                    .map_or(0, |e| e.occurrences)
            })
            .sum();
        total as f64 / main_numbers.len() as f64
    };

    let (risk_tier, message) = if hot_count >= BIAS_THRESHOLD {
        (RiskTier::High, HIGH_MESSAGE)
    } else if cold_count >= BIAS_THRESHOLD {
        (RiskTier::Low, LOW_MESSAGE)
    } else {
        (RiskTier::Medium, MEDIUM_MESSAGE)
    };

    CombinationAnalysis {
        hot_count,
        cold_count,
        average_frequency,
        risk_tier,
        message: message.to_string(),
    }
}
