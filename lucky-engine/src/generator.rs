use log::debug;
use rand::Rng;
use rand::seq::index;

use lucky_db::models::{GeneratedCombination, GenerationMode, LotteryConfig, UserProfile};
use lucky_db::registry::LotteryRegistry;

use crate::error::{EngineError, Result, ValidationError};
use crate::numerology::{letter_values, life_path_number, reduce_digits};

/// Décalage appliqué à chaque position lors de la génération numérologique.
const POSITION_STEP: u32 = 7;

/// Comment obtenir les numéros principaux d'une combinaison.
#[derive(Debug, Clone, Copy)]
pub enum Strategy<'a> {
    Numerology(&'a UserProfile),
    Random,
    /// Saisie brute, séparée par des virgules.
    Custom(&'a str),
}

impl Strategy<'_> {
    pub fn mode(&self) -> GenerationMode {
        match self {
            Strategy::Numerology(_) => GenerationMode::Numerology,
            Strategy::Random => GenerationMode::Random,
            Strategy::Custom(_) => GenerationMode::Custom,
        }
    }
}

pub struct NumberGenerator<'a> {
    registry: &'a LotteryRegistry,
}

impl<'a> NumberGenerator<'a> {
    pub fn new(registry: &'a LotteryRegistry) -> Self {
        Self { registry }
    }

    pub fn config(&self, lottery_id: &str) -> Result<&'a LotteryConfig> {
        self.registry
            .get(lottery_id)
            .ok_or_else(|| EngineError::UnknownLottery(lottery_id.to_string()))
    }

    pub fn numerology(&self, profile: &UserProfile, lottery_id: &str) -> Result<Vec<u8>> {
        let config = self.config(lottery_id)?;
        Ok(numerology_numbers(config, profile))
    }

    pub fn random<R: Rng + ?Sized>(&self, lottery_id: &str, rng: &mut R) -> Result<Vec<u8>> {
        let config = self.config(lottery_id)?;
        Ok(random_numbers(config, rng))
    }

    pub fn custom(&self, lottery_id: &str, input: &str) -> Result<Vec<u8>> {
        let config = self.config(lottery_id)?;
        let values = parse_custom(input)?;
        Ok(validate_custom(config, &values)?)
    }

    pub fn bonus<R: Rng + ?Sized>(&self, lottery_id: &str, rng: &mut R) -> Result<Vec<u8>> {
        let config = self.config(lottery_id)?;
        Ok(bonus_numbers(config, rng))
    }

    /// Numéros principaux selon la stratégie, puis numéros bonus tirés
    /// au hasard (y compris pour une saisie personnalisée).
    pub fn generate<R: Rng + ?Sized>(
        &self,
        lottery_id: &str,
        strategy: Strategy<'_>,
        rng: &mut R,
    ) -> Result<GeneratedCombination> {
        let config = self.config(lottery_id)?;
        let main_numbers = match strategy {
            Strategy::Numerology(profile) => numerology_numbers(config, profile),
            Strategy::Random => random_numbers(config, rng),
            Strategy::Custom(input) => validate_custom(config, &parse_custom(input)?)?,
        };
        let bonus_numbers = bonus_numbers(config, rng);
        debug!(
            "{} ({}) : {:?} + {:?}",
            config.id,
            strategy.mode(),
            main_numbers,
            bonus_numbers
        );
        Ok(GeneratedCombination {
            main_numbers,
            bonus_numbers,
            mode: strategy.mode(),
        })
    }
}

/// Graine numérologique : chemin de vie, valeurs des lettres du nom,
/// puis réduction de chaque date marquante.
pub fn numerology_seed(profile: &UserProfile) -> Vec<u32> {
    let mut seed = vec![life_path_number(&profile.birth_date)];
    seed.extend(letter_values(&profile.name));
    seed.extend(profile.significant_dates.iter().map(|d| reduce_digits(&d.date)));
    seed
}

/// Génération déterministe. En cas de collision, sondage linéaire sur le
/// cycle 1..=max : termine puisque `total_numbers <= max_number`.
/// Réservé au crate : la configuration doit venir du registre, qui l'a validée.
pub(crate) fn numerology_numbers(config: &LotteryConfig, profile: &UserProfile) -> Vec<u8> {
    let max = config.max_number as u32;
    let seed = numerology_seed(profile);
    let mut numbers: Vec<u8> = Vec::with_capacity(config.total_numbers);

    for i in 0..config.total_numbers {
        let base = seed[i % seed.len()];
        let mut candidate = (base + i as u32 * POSITION_STEP) % max + 1;
        while numbers.contains(&(candidate as u8)) {
            candidate = candidate % max + 1;
        }
        numbers.push(candidate as u8);
    }

    numbers.sort_unstable();
    numbers
}

/// `count` valeurs distinctes uniformes dans 1..=max.
fn sample_without_replacement<R: Rng + ?Sized>(max: u8, count: usize, rng: &mut R) -> Vec<u8> {
    let mut numbers: Vec<u8> = index::sample(rng, max as usize, count)
        .into_iter()
        .map(|i| i as u8 + 1)
        .collect();
    numbers.sort_unstable();
    numbers
}

/// La configuration doit être valide (voir `LotteryConfig::validate`).
pub(crate) fn random_numbers<R: Rng + ?Sized>(config: &LotteryConfig, rng: &mut R) -> Vec<u8> {
    sample_without_replacement(config.max_number, config.total_numbers, rng)
}

pub(crate) fn bonus_numbers<R: Rng + ?Sized>(config: &LotteryConfig, rng: &mut R) -> Vec<u8> {
    if !config.has_bonus() {
        return Vec::new();
    }
    sample_without_replacement(config.max_bonus, config.bonus_count, rng)
}

/// Découpe une saisie du type "7, 14,21" ; les segments vides sont ignorés.
pub fn parse_custom(input: &str) -> std::result::Result<Vec<i64>, ValidationError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ValidationError::NotANumber(s.to_string()))
        })
        .collect()
}

/// Contrôle nombre, plage et unicité ; ne tronque ni ne complète jamais.
pub fn validate_custom(
    config: &LotteryConfig,
    values: &[i64],
) -> std::result::Result<Vec<u8>, ValidationError> {
    if values.len() != config.total_numbers {
        return Err(ValidationError::WrongCount {
            expected: config.total_numbers,
            actual: values.len(),
        });
    }

    let max = config.max_number;
    let mut numbers = Vec::with_capacity(values.len());
    for &value in values {
        if value < 1 || value > max as i64 {
            return Err(ValidationError::OutOfRange { value, max });
        }
        let n = value as u8;
        if numbers.contains(&n) {
            return Err(ValidationError::Duplicate(n));
        }
        numbers.push(n);
    }

    numbers.sort_unstable();
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_db::models::SignificantDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn profile() -> UserProfile {
        UserProfile {
            name: "María García".to_string(),
            birth_date: "1990-05-15".to_string(),
            significant_dates: vec![
                SignificantDate { date: "2015-08-20".into(), label: "Boda".into() },
                SignificantDate { date: "2018-03-10".into(), label: "Nacimiento hijo".into() },
            ],
            preferred_lotteries: vec!["euromillions".to_string()],
            spending_limit: 50.0,
            current_spending: 35.0,
        }
    }

    fn assert_well_formed(numbers: &[u8], config: &LotteryConfig, count: usize, max: u8) {
        assert_eq!(numbers.len(), count, "{}: {:?}", config.id, numbers);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]), "non trié ou doublon : {:?}", numbers);
        assert!(numbers.iter().all(|&n| n >= 1 && n <= max), "hors limites : {:?}", numbers);
    }

    #[test]
    fn test_numerology_seed() {
        let p = profile();
        let seed = numerology_seed(&p);
        // chemin de vie 3, 9 lettres (les 'í' sont ignorés), 2 dates
        assert_eq!(seed.len(), 1 + 9 + 2);
        assert_eq!(seed[0], 3);
        assert_eq!(&seed[1..10], &[4, 1, 9, 1, 7, 1, 9, 3, 1]);
        // 2+0+1+5+0+8+2+0 = 18 -> 9 ; 2+0+1+8+0+3+1+0 = 15 -> 6
        assert_eq!(&seed[10..], &[9, 6]);
    }

    #[test]
    fn test_numerology_known_values() {
        let config = LotteryConfig::new("euromillions", "EuroMillions", 50, 5, 2, 12);
        // graine [3, 4, 1, 9, 1, ...] : 3%50+1, 11%50+1, 15%50+1, 30%50+1, 29%50+1
        assert_eq!(numerology_numbers(&config, &profile()), vec![4, 12, 16, 30, 31]);
    }

    #[test]
    fn test_numerology_probe_on_collision() {
        // graine [1] seule, max 7 : 2 ; 8%7+1=2 pris -> 3 ; 15%7+1=2 pris, 3 pris -> 4
        let p = UserProfile {
            name: String::new(),
            birth_date: "1".to_string(),
            significant_dates: vec![],
            preferred_lotteries: vec![],
            spending_limit: 0.0,
            current_spending: 0.0,
        };
        let config = LotteryConfig::new("mini", "Mini", 7, 3, 0, 0);
        assert_eq!(numerology_numbers(&config, &p), vec![2, 3, 4]);
    }

    #[test]
    fn test_numerology_probe_wraps_around() {
        // tous les numéros de la plage doivent être trouvés
        let config = LotteryConfig::new("full", "Full", 6, 6, 0, 0);
        let numbers = numerology_numbers(&config, &profile());
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_numerology_all_builtin() {
        let registry = LotteryRegistry::builtin();
        let generator = NumberGenerator::new(&registry);
        for config in registry.iter() {
            let numbers = generator.numerology(&profile(), &config.id).unwrap();
            assert_well_formed(&numbers, config, config.total_numbers, config.max_number);
            assert_eq!(numbers, generator.numerology(&profile(), &config.id).unwrap());
        }
    }

    #[test]
    fn test_unknown_lottery() {
        let registry = LotteryRegistry::builtin();
        let generator = NumberGenerator::new(&registry);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generator.numerology(&profile(), "eurojackpot"),
            Err(EngineError::UnknownLottery(_))
        ));
        assert!(matches!(generator.random("eurojackpot", &mut rng), Err(EngineError::UnknownLottery(_))));
        assert!(matches!(generator.bonus("eurojackpot", &mut rng), Err(EngineError::UnknownLottery(_))));
        assert!(matches!(
            generator.custom("eurojackpot", "1,2,3,4,5"),
            Err(EngineError::UnknownLottery(_))
        ));
    }

    #[test]
    fn test_unsampleable_configs_never_reach_generator() {
        // max 0 (modulo nul) ou plus de numéros que la plage : refusés par le registre
        for config in [
            LotteryConfig::new("zero", "Zero", 0, 5, 0, 0),
            LotteryConfig::new("over", "Over", 5, 6, 0, 0),
            LotteryConfig::new("stars", "Stars", 50, 5, 3, 2),
        ] {
            assert!(LotteryRegistry::new(vec![config]).is_err());
        }
        let json = r#"[{"id": "zero", "display_name": "Zero", "max_number": 0, "total_numbers": 5}]"#;
        assert!(LotteryRegistry::from_json(json).is_err());
    }

    #[test]
    fn test_random_well_formed() {
        let registry = LotteryRegistry::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        for config in registry.iter() {
            for _ in 0..100 {
                let numbers = random_numbers(config, &mut rng);
                assert_well_formed(&numbers, config, config.total_numbers, config.max_number);
                let bonus = bonus_numbers(config, &mut rng);
                assert_well_formed(&bonus, config, config.bonus_count, config.max_bonus);
            }
        }
    }

    #[test]
    fn test_random_seed_reproducible() {
        let config = LotteryConfig::new("euromillions", "EuroMillions", 50, 5, 2, 12);
        let a = random_numbers(&config, &mut StdRng::seed_from_u64(7));
        let b = random_numbers(&config, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_uniform() {
        let config = LotteryConfig::new("euromillions", "EuroMillions", 50, 5, 2, 12);
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 10_000;
        let mut counts = [0u32; 50];
        for _ in 0..trials {
            for n in random_numbers(&config, &mut rng) {
                counts[(n - 1) as usize] += 1;
            }
        }
        // attendu : 10_000 * 5 / 50 = 1000 par numéro, écart-type ~30
        let expected = (trials * 5 / 50) as f64;
        for (i, &c) in counts.iter().enumerate() {
            let deviation = (c as f64 - expected).abs() / expected;
            assert!(deviation < 0.15, "numéro {} : {} tirages", i + 1, c);
        }
    }

    #[test]
    fn test_no_bonus() {
        let config = LotteryConfig::new("lotto", "Lotto", 59, 6, 0, 0);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(bonus_numbers(&config, &mut rng).is_empty());
    }

    #[test]
    fn test_custom_valid() {
        let registry = LotteryRegistry::builtin();
        let generator = NumberGenerator::new(&registry);
        assert_eq!(generator.custom("euromillions", "7,14,21,28,35").unwrap(), vec![7, 14, 21, 28, 35]);
        assert_eq!(generator.custom("euromillions", " 35, 7 ,28,14,21, ").unwrap(), vec![7, 14, 21, 28, 35]);
    }

    #[test]
    fn test_custom_rules() {
        let registry = LotteryRegistry::builtin();
        let generator = NumberGenerator::new(&registry);
        let rule = |input: &str| match generator.custom("euromillions", input) {
            Err(EngineError::Validation(e)) => e,
            other => panic!("attendu une erreur de validation pour {input}, obtenu {:?}", other),
        };
        assert_eq!(rule("7,14,21,28,7"), ValidationError::Duplicate(7));
        assert_eq!(rule("1,2,3,4"), ValidationError::WrongCount { expected: 5, actual: 4 });
        assert_eq!(rule("0,2,3,4,5"), ValidationError::OutOfRange { value: 0, max: 50 });
        assert_eq!(rule("1,2,3,4,51"), ValidationError::OutOfRange { value: 51, max: 50 });
        assert_eq!(rule("1,2,trois,4,5"), ValidationError::NotANumber("trois".to_string()));
        assert_eq!(rule("-1,2,3,4,5"), ValidationError::OutOfRange { value: -1, max: 50 });
    }

    #[test]
    fn test_generate_modes() {
        let registry = LotteryRegistry::builtin();
        let generator = NumberGenerator::new(&registry);
        let mut rng = StdRng::seed_from_u64(11);
        let p = profile();

        let numerology = generator.generate("euromillions", Strategy::Numerology(&p), &mut rng).unwrap();
        assert_eq!(numerology.mode, GenerationMode::Numerology);
        assert_eq!(numerology.main_numbers, vec![4, 12, 16, 30, 31]);
        assert_eq!(numerology.bonus_numbers.len(), 2);

        let random = generator.generate("powerball", Strategy::Random, &mut rng).unwrap();
        assert_eq!(random.mode, GenerationMode::Random);
        assert_eq!(random.main_numbers.len(), 5);
        assert_eq!(random.bonus_numbers.len(), 1);

        let custom = generator.generate("spanish", Strategy::Custom("49,1,2,3,4,5"), &mut rng).unwrap();
        assert_eq!(custom.mode, GenerationMode::Custom);
        assert_eq!(custom.main_numbers, vec![1, 2, 3, 4, 5, 49]);
        assert_eq!(custom.bonus_numbers.len(), 1);
        assert!(custom.bonus_numbers[0] >= 1 && custom.bonus_numbers[0] <= 9);

        assert!(generator.generate("spanish", Strategy::Custom("1,2,3"), &mut rng).is_err());
    }
}
