use std::path::Path;

use anyhow::{Context, Result};

use lucky_db::models::{SignificantDate, UserProfile};

/// Profil de démonstration utilisé quand aucun fichier n'est fourni.
pub fn demo_profile() -> UserProfile {
    UserProfile {
        name: "María García".to_string(),
        birth_date: "1990-05-15".to_string(),
        significant_dates: vec![
            SignificantDate {
                date: "2015-08-20".to_string(),
                label: "Mariage".to_string(),
            },
            SignificantDate {
                date: "2018-03-10".to_string(),
                label: "Naissance".to_string(),
            },
            SignificantDate {
                date: "2020-12-01".to_string(),
                label: "Nouveau travail".to_string(),
            },
        ],
        preferred_lotteries: vec![
            "euromillions".to_string(),
            "spanish".to_string(),
            "powerball".to_string(),
        ],
        spending_limit: 50.0,
        current_spending: 35.0,
    }
}

pub fn load_profile(path: Option<&Path>) -> Result<UserProfile> {
    let Some(path) = path else {
        return Ok(demo_profile());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire le profil {:?}", path))?;
    let profile: UserProfile = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {:?}", path))?;
    log::debug!("profil chargé : {}", profile.name);
    Ok(profile)
}
