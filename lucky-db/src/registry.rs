use crate::error::{DbError, Result};
use crate::models::LotteryConfig;

/// Table des loteries connues, construite une fois et passée explicitement
/// au générateur. Conserve l'ordre d'insertion pour l'affichage.
#[derive(Debug, Clone)]
pub struct LotteryRegistry {
    configs: Vec<LotteryConfig>,
}

impl LotteryRegistry {
    pub fn new(configs: Vec<LotteryConfig>) -> Result<Self> {
        for (i, config) in configs.iter().enumerate() {
            config.validate()?;
            if configs[..i].iter().any(|c| c.id == config.id) {
                return Err(DbError::DuplicateId(config.id.clone()));
            }
        }
        Ok(Self { configs })
    }

    pub fn builtin() -> Self {
        Self {
            configs: vec![
                LotteryConfig::new("euromillions", "EuroMillions", 50, 5, 2, 12),
                LotteryConfig::new("powerball", "Powerball", 69, 5, 1, 26),
                LotteryConfig::new("megamillions", "Mega Millions", 70, 5, 1, 25),
                LotteryConfig::new("spanish", "Lotería Primitiva", 49, 6, 1, 9),
            ],
        }
    }

    /// Charge une table de remplacement : un tableau JSON de `LotteryConfig`.
    pub fn from_json(json: &str) -> Result<Self> {
        let configs: Vec<LotteryConfig> = serde_json::from_str(json)?;
        Self::new(configs)
    }

    pub fn get(&self, id: &str) -> Option<&LotteryConfig> {
        self.configs.iter().find(|c| c.id == id)
    }

    pub fn lookup(&self, id: &str) -> Result<&LotteryConfig> {
        self.get(id)
            .ok_or_else(|| DbError::UnknownLottery(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LotteryConfig> {
        self.configs.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.configs.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = LotteryRegistry::builtin();
        let config = registry.lookup("euromillions").unwrap();
        assert_eq!(config.max_number, 50);
        assert_eq!(config.total_numbers, 5);
        assert_eq!(config.bonus_count, 2);
        assert_eq!(config.max_bonus, 12);

        let spanish = registry.lookup("spanish").unwrap();
        assert_eq!(spanish.total_numbers, 6);
        assert_eq!(spanish.max_number, 49);
    }

    #[test]
    fn test_builtin_configs_valid() {
        let registry = LotteryRegistry::builtin();
        assert_eq!(registry.len(), 4);
        for config in registry.iter() {
            assert!(config.validate().is_ok(), "{} invalide", config.id);
        }
    }

    #[test]
    fn test_unknown_lottery() {
        let registry = LotteryRegistry::builtin();
        assert!(registry.get("eurojackpot").is_none());
        match registry.lookup("eurojackpot") {
            Err(DbError::UnknownLottery(id)) => assert_eq!(id, "eurojackpot"),
            other => panic!("attendu UnknownLottery, obtenu {:?}", other),
        }
    }

    #[test]
    fn test_ids_keep_order() {
        let registry = LotteryRegistry::builtin();
        assert_eq!(registry.ids(), vec!["euromillions", "powerball", "megamillions", "spanish"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let configs = vec![
            LotteryConfig::new("lotto", "Lotto", 49, 6, 0, 0),
            LotteryConfig::new("lotto", "Lotto bis", 59, 6, 0, 0),
        ];
        assert!(matches!(LotteryRegistry::new(configs), Err(DbError::DuplicateId(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": "lotto", "display_name": "UK Lotto", "max_number": 59, "total_numbers": 6},
            {"id": "thunderball", "display_name": "Thunderball", "max_number": 39, "total_numbers": 5, "bonus_count": 1, "max_bonus": 14}
        ]"#;
        let registry = LotteryRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.lookup("lotto").unwrap().has_bonus());
        assert_eq!(registry.lookup("thunderball").unwrap().max_bonus, 14);
    }

    #[test]
    fn test_from_json_invalid_config() {
        let json = r#"[{"id": "bad", "display_name": "Bad", "max_number": 5, "total_numbers": 6}]"#;
        assert!(matches!(LotteryRegistry::from_json(json), Err(DbError::InvalidConfig { .. })));
        assert!(matches!(LotteryRegistry::from_json("not json"), Err(DbError::Json(_))));
    }
}
