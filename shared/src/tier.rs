/// Tier labels in display order, best first.
pub const TIER_ORDER: [&str; 11] = [
    "10 (Best)",
    "9",
    "8",
    "7 (Strong)",
    "6",
    "5",
    "4 (Viable)",
    "3",
    "2",
    "1",
    "0 (Fringe)",
];

pub fn tier_index(tier: &str) -> Option<usize> {
    TIER_ORDER.iter().position(|t| *t == tier)
}

/// Leading numeral of a tier label: `"7 (Strong)"` -> `"7"`.
pub fn tier_numeral(tier: &str) -> &str {
    tier.split(' ').next().unwrap_or(tier)
}

/// Parenthesized caption of a tier label, if any: `"7 (Strong)"` -> `"Strong"`.
pub fn tier_caption(tier: &str) -> Option<&str> {
    let (_, rest) = tier.split_once('(')?;
    Some(rest.split(')').next().unwrap_or(rest))
}
