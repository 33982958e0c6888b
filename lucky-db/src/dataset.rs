use std::collections::HashMap;

use crate::models::{DrawResult, NextDraw};

/// Historique des tirages en mémoire, indexé par identifiant de loterie.
/// Aucune persistance : l'appelant fournit les données, ou part du jeu
/// d'exemple de `builtin()`.
#[derive(Debug, Clone, Default)]
pub struct HistoryDataset {
    results: HashMap<String, Vec<DrawResult>>,
    next_draws: HashMap<String, NextDraw>,
}

impl HistoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut dataset = Self::new();
        dataset.insert(
            "euromillions",
            vec![
                draw("2024-09-20", &[7, 12, 23, 34, 45], &[3, 8], 45_000_000.0),
                draw("2024-09-17", &[2, 15, 28, 39, 47], &[1, 11], 42_000_000.0),
                draw("2024-09-13", &[9, 18, 25, 31, 42], &[5, 9], 38_000_000.0),
                draw("2024-09-10", &[4, 16, 22, 35, 48], &[2, 7], 35_000_000.0),
                draw("2024-09-06", &[11, 19, 26, 33, 44], &[4, 10], 32_000_000.0),
            ],
        );
        dataset.insert(
            "powerball",
            vec![
                draw("2024-09-21", &[8, 15, 27, 42, 58], &[13], 85_000_000.0),
                draw("2024-09-18", &[3, 22, 35, 49, 63], &[8], 78_000_000.0),
                draw("2024-09-14", &[12, 28, 41, 55, 67], &[19], 72_000_000.0),
                draw("2024-09-11", &[5, 18, 32, 46, 61], &[4], 65_000_000.0),
                draw("2024-09-07", &[14, 25, 38, 52, 69], &[22], 58_000_000.0),
            ],
        );
        dataset.insert(
            "spanish",
            vec![
                draw("2024-09-19", &[6, 13, 21, 29, 37, 45], &[3], 8_000_000.0),
                draw("2024-09-16", &[2, 17, 24, 32, 41, 48], &[7], 7_500_000.0),
                draw("2024-09-12", &[9, 15, 26, 34, 43, 49], &[1], 7_200_000.0),
                draw("2024-09-09", &[4, 11, 23, 31, 39, 46], &[5], 6_800_000.0),
                draw("2024-09-05", &[7, 18, 25, 33, 42, 47], &[9], 6_500_000.0),
            ],
        );

        dataset.set_next_draw("euromillions", "2024-09-24 21:00", 48_000_000.0);
        dataset.set_next_draw("powerball", "2024-09-25 03:00", 92_000_000.0);
        dataset.set_next_draw("spanish", "2024-09-26 21:30", 8_500_000.0);
        dataset.set_next_draw("megamillions", "2024-09-24 23:00", 75_000_000.0);
        dataset
    }

    /// Remplace l'historique d'une loterie.
    pub fn insert(&mut self, lottery_id: &str, results: Vec<DrawResult>) {
        self.results.insert(lottery_id.to_string(), results);
    }

    pub fn set_next_draw(&mut self, lottery_id: &str, date_time: &str, jackpot: f64) {
        self.next_draws.insert(
            lottery_id.to_string(),
            NextDraw {
                date_time: date_time.to_string(),
                jackpot,
            },
        );
    }

    /// Tirages connus ; tranche vide si la loterie n'a pas d'historique.
    pub fn results(&self, lottery_id: &str) -> &[DrawResult] {
        self.results
            .get(lottery_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn next_draw(&self, lottery_id: &str) -> Option<&NextDraw> {
        self.next_draws.get(lottery_id)
    }

    pub fn count(&self, lottery_id: &str) -> usize {
        self.results(lottery_id).len()
    }
}

fn draw(date: &str, numbers: &[u8], bonus: &[u8], jackpot: f64) -> DrawResult {
    DrawResult {
        date: date.to_string(),
        numbers: numbers.to_vec(),
        bonus_numbers: bonus.to_vec(),
        jackpot,
    }
}
