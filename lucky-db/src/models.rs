use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// Forme d'un tirage : combien de numéros principaux, dans quelle plage,
/// et le cas échéant combien de numéros bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryConfig {
    pub id: String,
    pub display_name: String,
    pub max_number: u8,
    pub total_numbers: usize,
    #[serde(default)]
    pub bonus_count: usize,
    #[serde(default)]
    pub max_bonus: u8,
}

impl LotteryConfig {
    pub fn new(
        id: &str,
        display_name: &str,
        max_number: u8,
        total_numbers: usize,
        bonus_count: usize,
        max_bonus: u8,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            max_number,
            total_numbers,
            bonus_count,
            max_bonus,
        }
    }

    pub fn has_bonus(&self) -> bool {
        self.bonus_count > 0
    }

    pub fn validate(&self) -> Result<(), DbError> {
        let invalid = |reason: String| DbError::InvalidConfig {
            id: self.id.clone(),
            reason,
        };
        if self.id.trim().is_empty() {
            return Err(invalid("identifiant vide".into()));
        }
        if self.max_number == 0 {
            return Err(invalid("max_number doit être > 0".into()));
        }
        if self.total_numbers == 0 || self.total_numbers > self.max_number as usize {
            return Err(invalid(format!(
                "total_numbers = {} hors de 1-{}",
                self.total_numbers, self.max_number
            )));
        }
        if self.bonus_count > 0 && self.max_bonus == 0 {
            return Err(invalid("bonus_count > 0 exige max_bonus > 0".into()));
        }
        // Tirage sans remise : impossible de choisir plus de bonus que la plage n'en contient
        if self.bonus_count > self.max_bonus as usize {
            return Err(invalid(format!(
                "bonus_count = {} dépasse max_bonus = {}",
                self.bonus_count, self.max_bonus
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignificantDate {
    pub date: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub birth_date: String,
    #[serde(default)]
    pub significant_dates: Vec<SignificantDate>,
    #[serde(default)]
    pub preferred_lotteries: Vec<String>,
    #[serde(default)]
    pub spending_limit: f64,
    #[serde(default)]
    pub current_spending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub date: String,
    pub numbers: Vec<u8>,
    #[serde(default)]
    pub bonus_numbers: Vec<u8>,
    pub jackpot: f64,
}

impl DrawResult {
    /// Vérifie un tirage importé contre la forme de sa loterie.
    pub fn validate(&self, config: &LotteryConfig) -> Result<(), DbError> {
        let invalid = |reason: String| DbError::InvalidDraw {
            date: self.date.clone(),
            reason,
        };
        if self.numbers.len() != config.total_numbers {
            return Err(invalid(format!(
                "{} numéros au lieu de {}",
                self.numbers.len(),
                config.total_numbers
            )));
        }
        if self.bonus_numbers.len() != config.bonus_count {
            return Err(invalid(format!(
                "{} bonus au lieu de {}",
                self.bonus_numbers.len(),
                config.bonus_count
            )));
        }
        for &n in &self.numbers {
            if n < 1 || n > config.max_number {
                return Err(invalid(format!("numéro {} hors limites (1-{})", n, config.max_number)));
            }
        }
        for &b in &self.bonus_numbers {
            if b < 1 || b > config.max_bonus {
                return Err(invalid(format!("bonus {} hors limites (1-{})", b, config.max_bonus)));
            }
        }
        if let Some(n) = first_duplicate(&self.numbers) {
            return Err(invalid(format!("numéro en double : {}", n)));
        }
        if let Some(b) = first_duplicate(&self.bonus_numbers) {
            return Err(invalid(format!("bonus en double : {}", b)));
        }
        if self.jackpot < 0.0 {
            return Err(invalid(format!("jackpot négatif : {}", self.jackpot)));
        }
        Ok(())
    }
}

fn first_duplicate(values: &[u8]) -> Option<u8> {
    let mut seen = HashSet::new();
    values.iter().copied().find(|&v| !seen.insert(v))
}

/// Prochain tirage annoncé pour une loterie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextDraw {
    pub date_time: String,
    pub jackpot: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub number: u8,
    pub occurrences: u32,
    pub last_seen: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Numerology,
    Random,
    Custom,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Numerology => write!(f, "numérologie"),
            GenerationMode::Random => write!(f, "aléatoire"),
            GenerationMode::Custom => write!(f, "personnalisé"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCombination {
    pub main_numbers: Vec<u8>,
    pub bonus_numbers: Vec<u8>,
    pub mode: GenerationMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "BAS"),
            RiskTier::Medium => write!(f, "MOYEN"),
            RiskTier::High => write!(f, "ÉLEVÉ"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationAnalysis {
    pub hot_count: usize,
    pub cold_count: usize,
    pub average_frequency: f64,
    pub risk_tier: RiskTier,
    pub message: String,
}
