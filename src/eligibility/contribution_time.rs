/// Contribution-time buckets offered by the retirement form, in match order.
///
/// Each bucket collapses to a single representative year count. The table is
/// matched by substring on the lower-cased input and the first hit wins, so
/// the overlapping ranges (15–20/15–25 and 25–30/25–35) resolve to the same
/// value on purpose.
const CONTRIBUTION_BUCKETS: &[(&str, i32)] = &[
    ("entre 5 e 10 anos", 5),
    ("entre 10 e 15 anos", 10),
    ("entre 15 e 20 anos", 15),
    ("entre 15 e 25 anos", 15),
    ("entre 20 e 25 anos", 20),
    ("entre 25 e 30 anos", 25),
    ("entre 25 e 35 anos", 25),
    ("entre 30 e 35 anos", 30),
    ("mais de 35 anos", 35),
    ("menos de 15 anos", 10),
];

/// Map a free-text contribution bucket ("Entre 15 e 20 anos") to years.
///
/// Returns `None` for missing or empty input and for text that matches no
/// known bucket. Callers decide what an unknown bucket means.
pub fn parse_contribution_time(input: Option<&str>) -> Option<i32> {
    let input = input?;
    if input.is_empty() {
        return None;
    }

    let cleaned = input.trim().to_lowercase();

    CONTRIBUTION_BUCKETS
        .iter()
        .find(|(phrase, _)| cleaned.contains(phrase))
        .map(|&(_, years)| years)
}

/// Leading-integer parse used where the form sends a plain year count.
///
/// Accepts leading whitespace and an optional sign, then reads digits up to
/// the first non-digit ("22 anos" → 22). A `0x`/`0X` prefix switches to hex
/// ("0x1A" → 26). Input without digits, or with a magnitude outside `i64`,
/// yields `None`.
pub fn parse_contribution_years(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digit_count = rest
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digit_count == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&rest[..digit_count], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
