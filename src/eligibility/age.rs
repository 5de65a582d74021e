use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Calendar-month age used by the eligibility score.
///
/// Only year and month take part, day of month is ignored: someone born on
/// the 31st already counts the month on the 1st. Birth dates after `today`
/// produce negative ages.
pub fn age_in_months(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();
    let months = today.month() as i32 - birth_date.month() as i32;

    years * 12 + months
}

/// Year-only age used by the benefit date estimate.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth_date.year()
}

/// Parse the form's `birth_date` text.
///
/// Accepted: `YYYY-MM-DD`, an ISO timestamp (with or without offset, only the
/// date part is kept) and the Brazilian `DD/MM/YYYY`.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok())
}
