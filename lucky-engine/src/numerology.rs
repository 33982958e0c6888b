//! Réductions numérologiques : chemin de vie d'une date et valeur des lettres.

/// Nombres maîtres, jamais réduits.
pub const MASTER_NUMBERS: [u32; 2] = [11, 22];

pub fn is_master_number(n: u32) -> bool {
    MASTER_NUMBERS.contains(&n)
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Réduit un entier jusqu'à un seul chiffre, sauf 11 et 22.
/// Sans effet sur une valeur déjà réduite.
pub fn reduce_number(mut n: u32) -> u32 {
    // La somme des chiffres d'un nombre >= 10 est strictement plus petite : la boucle termine
    while n > 9 && !is_master_number(n) {
        n = digit_sum(n);
    }
    n
}

/// Somme les chiffres du texte puis applique `reduce_number`.
/// Un texte sans chiffre donne 0.
pub fn reduce_digits(text: &str) -> u32 {
    reduce_number(text.chars().filter_map(|c| c.to_digit(10)).sum())
}

pub fn life_path_number(birth_date: &str) -> u32 {
    reduce_digits(birth_date)
}

/// Valeur cyclique 1-9 de chaque lettre (a=1 … i=9, j=1 …), dans l'ordre.
/// Tout ce qui n'est pas une lettre ASCII est ignoré.
pub fn letter_values(name: &str) -> Vec<u32> {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .map(|c| (c as u32 - 'a' as u32) % 9 + 1)
        .collect()
}
