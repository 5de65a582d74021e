use chrono::{Datelike, NaiveDate};

use super::age::age_in_years;
use super::contribution_time::parse_contribution_years;

/// Statutory age and contribution thresholds for one gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitRequirement {
    pub age: i64,
    pub contribution_years: i64,
}

impl BenefitRequirement {
    /// `"feminino"` (exact match) gets 62/15, every other value 65/20.
    pub fn for_gender(gender: &str) -> Self {
        if gender == "feminino" {
            Self {
                age: 62,
                contribution_years: 15,
            }
        } else {
            Self {
                age: 65,
                contribution_years: 20,
            }
        }
    }
}

/// Estimate when a lead meets both the age and the contribution requirement.
///
/// `contribution_time` must hold a plain year count ("22"); text without a
/// leading integer gives `None`. Age here is a year-only difference. Returns
/// `today` when nothing is missing, otherwise `today` moved forward by the
/// longer of the two waits. Arithmetic is checked throughout, so extreme
/// inputs end up as `None` instead of a panic.
pub fn calculate_benefit_date(
    gender: &str,
    birth_date: NaiveDate,
    contribution_time: &str,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let Some(contribution_years) = parse_contribution_years(contribution_time) else {
        tracing::debug!(
            "Benefit date skipped: contribution_time '{}' is not a year count",
            contribution_time
        );
        return None;
    };

    let requirement = BenefitRequirement::for_gender(gender);
    let age = i64::from(age_in_years(birth_date, today));

    let years_until_age = requirement.age.checked_sub(age)?.max(0);
    let years_until_contribution = requirement
        .contribution_years
        .checked_sub(contribution_years)?
        .max(0);
    let years_to_wait = years_until_age.max(years_until_contribution);

    if years_to_wait == 0 {
        return Some(today);
    }

    let benefit_date = add_years(today, years_to_wait);
    if benefit_date.is_none() {
        tracing::error!(
            "Benefit date out of range: {} + {} years",
            today,
            years_to_wait
        );
    }
    benefit_date
}

/// Same month and day `years` later; 29 February rolls over to 1 March when
/// the target year has no leap day.
fn add_years(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    let year = i64::from(date.year()).checked_add(years)?;
    let year = i32::try_from(year).ok()?;

    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}
