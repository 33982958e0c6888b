//! Jeu responsable : messages de prévention, probabilité du jackpot et
//! suivi du budget mensuel.

use rand::Rng;

use lucky_db::models::{LotteryConfig, UserProfile};

pub const RESPONSIBLE_MESSAGES: [&str; 8] = [
    "Rappel : la loterie est un jeu de hasard. Ne misez que ce que vous pouvez vous permettre de perdre.",
    "Fixez-vous des limites de dépenses et respectez-les. Votre équilibre financier passe avant tout.",
    "Les tirages passés ne prédisent pas l'avenir. Chaque tirage est indépendant.",
    "Si le jeu affecte votre vie, n'hésitez pas à demander de l'aide à un professionnel.",
    "Jouez pour le plaisir, pas pour résoudre des problèmes d'argent.",
    "La probabilité de remporter le jackpot est extrêmement faible.",
    "N'empruntez jamais d'argent pour jouer à la loterie.",
    "Le jeu doit rester un divertissement, pas une obsession.",
];

/// Au-delà de ce pourcentage du budget, on avertit le joueur.
const CAUTION_PERCENT: f64 = 60.0;
const WARNING_PERCENT: f64 = 80.0;

pub fn pick_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RESPONSIBLE_MESSAGES[rng.random_range(0..RESPONSIBLE_MESSAGES.len())]
}

fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) est toujours divisible par i + 1
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

/// Nombre de grilles distinctes (principaux × bonus). `None` en cas de
/// dépassement de capacité.
pub fn jackpot_combinations(config: &LotteryConfig) -> Option<u128> {
    let main = binomial(config.max_number as u128, config.total_numbers as u128)?;
    let bonus = binomial(config.max_bonus as u128, config.bonus_count as u128)?;
    main.checked_mul(bonus)
}

/// Probabilité, en pourcentage, qu'une grille remporte le jackpot.
pub fn jackpot_odds_percent(config: &LotteryConfig) -> f64 {
    match jackpot_combinations(config) {
        Some(0) | None => 0.0,
        Some(n) => 100.0 / n as f64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    Comfortable,
    Caution,
    Warning,
}

impl std::fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetLevel::Comfortable => write!(f, "OK"),
            BudgetLevel::Caution => write!(f, "ATTENTION"),
            BudgetLevel::Warning => write!(f, "LIMITE PROCHE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingStatus {
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub level: BudgetLevel,
}

impl SpendingStatus {
    pub fn new(spent: f64, limit: f64) -> Self {
        let percentage = if limit > 0.0 {
            spent / limit * 100.0
        } else if spent > 0.0 {
            100.0
        } else {
            0.0
        };
        let level = if percentage > WARNING_PERCENT {
            BudgetLevel::Warning
        } else if percentage > CAUTION_PERCENT {
            BudgetLevel::Caution
        } else {
            BudgetLevel::Comfortable
        };
        Self {
            spent,
            limit,
            percentage,
            level,
        }
    }

    pub fn from_profile(profile: &UserProfile) -> Self {
        Self::new(profile.current_spending, profile.spending_limit)
    }

    pub fn remaining(&self) -> f64 {
        (self.limit - self.spent).max(0.0)
    }
}
