use std::collections::HashMap;

/// Reference site the "More info" link points at.
pub const INFO_BASE_URL: &str = "https://www.edmunds.com";

const STAR: &str = "⭐";

/// Star glyphs for a rating: round half to even, clamped to 1..=5.
/// A missing or non-finite rating yields no stars.
pub fn star_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => {
            let count = r.round_ties_even().clamp(1.0, 5.0) as usize;
            STAR.repeat(count)
        }
        _ => String::new(),
    }
}

/// Outbound link for a make, e.g. `https://www.edmunds.com/toyota/`.
pub fn info_link(make: &str) -> String {
    format!("{INFO_BASE_URL}/{}/", make.to_lowercase())
}

/// First three words of a text, lowercased, punctuation stripped.
pub fn opening_phrase(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pairs of indices whose texts open with the same phrase.
pub fn repeated_openings<S: AsRef<str>>(texts: &[S]) -> Vec<(usize, usize)> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut repeats = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        let phrase = opening_phrase(text.as_ref());
        if phrase.is_empty() {
            continue;
        }
        match first_seen.get(&phrase) {
            Some(&j) => repeats.push((j, i)),
            None => {
                first_seen.insert(phrase, i);
            }
        }
    }
    repeats
}
