use crate::validator::utf16_len;

/// Password strength score, 0 (very weak) to 5 (very strong)
pub fn strength(password: &str) -> u8 {
    let checks = [
        utf16_len(password) >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|passed| **passed).count() as u8
}

pub fn strength_label(score: u8) -> &'static str {
    match score {
        1 => "Weak",
        2 => "Fair",
        3 => "Good",
        4 => "Strong",
        5 => "Very Strong",
        _ => "Very Weak",
    }
}
