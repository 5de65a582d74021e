use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::age::age_in_months;
use super::contribution_time::parse_contribution_time;

const YOUNG_LIMIT_MONTHS: i32 = 58 * 12;
const FEMALE_AGE_MONTHS: i32 = 61 * 12 + 8;
const SENIOR_AGE_MONTHS: i32 = 64 * 12 + 8;
const MIN_CONTRIBUTION_YEARS: i32 = 15;

/// Routing tag attached to retirement leads.
///
/// Despite the historical "score" name this is a classification, not a
/// metric: the only numeric view is [`EligibilityScore::code`], which is what
/// gets stored and shown downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EligibilityScore {
    /// Under 58, regardless of anything else.
    Young,
    /// Woman old enough for assistance (LOAS) without enough contribution.
    FemaleAssistance,
    /// Woman with enough contribution still waiting on age.
    FemaleAwaitingAge,
    /// Woman meeting both requirements.
    FemaleRetirement,
    /// Man below the senior age threshold.
    MaleAwaitingAge,
    /// Man old enough for assistance (LOAS) without enough contribution.
    MaleAssistance,
    /// Man meeting both requirements.
    MaleRetirement,
    /// Known gender with no matching rule.
    Fallback,
    /// Gender missing or not recognised.
    Unspecified,
}

impl EligibilityScore {
    pub fn code(self) -> i32 {
        match self {
            EligibilityScore::Young => 80,
            EligibilityScore::FemaleAssistance => 90,
            EligibilityScore::FemaleAwaitingAge => 91,
            EligibilityScore::FemaleRetirement => 92,
            EligibilityScore::MaleAwaitingAge => 96,
            EligibilityScore::MaleAssistance => 97,
            EligibilityScore::MaleRetirement => 98,
            EligibilityScore::Fallback => 85,
            EligibilityScore::Unspecified => 50,
        }
    }
}

impl From<EligibilityScore> for i32 {
    fn from(score: EligibilityScore) -> Self {
        score.code()
    }
}

impl Serialize for EligibilityScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Classify a retirement lead.
///
/// Age is measured in calendar months (see [`age_in_months`]) and the
/// contribution bucket goes through [`parse_contribution_time`]; an unknown
/// bucket counts as zero years. Gender is compared case-insensitively
/// against `"f"` and `"m"` only.
pub fn calculate_score(
    gender: &str,
    birth_date: NaiveDate,
    contribution_time: Option<&str>,
    today: NaiveDate,
) -> EligibilityScore {
    let gender = gender.to_lowercase();
    let contribution_years = parse_contribution_time(contribution_time).unwrap_or(0);
    let age_months = age_in_months(birth_date, today);

    if age_months < YOUNG_LIMIT_MONTHS {
        return EligibilityScore::Young;
    }

    match gender.as_str() {
        "f" => {
            if age_months >= SENIOR_AGE_MONTHS && contribution_years < MIN_CONTRIBUTION_YEARS {
                EligibilityScore::FemaleAssistance
            } else if age_months < FEMALE_AGE_MONTHS
                && contribution_years >= MIN_CONTRIBUTION_YEARS
            {
                EligibilityScore::FemaleAwaitingAge
            } else if age_months >= FEMALE_AGE_MONTHS
                && contribution_years >= MIN_CONTRIBUTION_YEARS
            {
                EligibilityScore::FemaleRetirement
            } else {
                EligibilityScore::Fallback
            }
        }
        "m" => {
            if age_months < SENIOR_AGE_MONTHS {
                EligibilityScore::MaleAwaitingAge
            } else if contribution_years < MIN_CONTRIBUTION_YEARS {
                EligibilityScore::MaleAssistance
            } else {
                EligibilityScore::MaleRetirement
            }
        }
        _ => EligibilityScore::Unspecified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn born_months_ago(months: u32) -> NaiveDate {
        today().checked_sub_months(Months::new(months)).unwrap()
    }

    #[test]
    fn test_codes_match_routing_table() {
        let codes: Vec<i32> = [
            EligibilityScore::Unspecified,
            EligibilityScore::Young,
            EligibilityScore::Fallback,
            EligibilityScore::FemaleAssistance,
            EligibilityScore::FemaleAwaitingAge,
            EligibilityScore::FemaleRetirement,
            EligibilityScore::MaleAwaitingAge,
            EligibilityScore::MaleAssistance,
            EligibilityScore::MaleRetirement,
        ]
        .into_iter()
        .map(i32::from)
        .collect();

        assert_eq!(codes, vec![50, 80, 85, 90, 91, 92, 96, 97, 98]);
    }

    #[test]
    fn test_young_wins_before_gender() {
        let birth = born_months_ago(58 * 12 - 1);
        for gender in ["f", "M", "", "outro"] {
            assert_eq!(
                calculate_score(gender, birth, Some("mais de 35 anos"), today()),
                EligibilityScore::Young
            );
        }
    }

    #[test]
    fn test_female_branches() {
        let senior = born_months_ago(64 * 12 + 8);
        assert_eq!(
            calculate_score("F", senior, Some("entre 10 e 15 anos"), today()).code(),
            90
        );
        assert_eq!(
            calculate_score("f", senior, Some("entre 15 e 20 anos"), today()).code(),
            92
        );

        let approaching = born_months_ago(61 * 12 + 7);
        assert_eq!(
            calculate_score("f", approaching, Some("entre 20 e 25 anos"), today()).code(),
            91
        );
        assert_eq!(
            calculate_score("f", approaching, Some("menos de 15 anos"), today()).code(),
            85
        );

        let eligible = born_months_ago(61 * 12 + 8);
        assert_eq!(
            calculate_score("f", eligible, Some("mais de 35 anos"), today()).code(),
            92
        );
    }

    #[test]
    fn test_male_branches() {
        let below = born_months_ago(64 * 12 + 7);
        assert_eq!(
            calculate_score("m", below, Some("mais de 35 anos"), today()).code(),
            96
        );

        let senior = born_months_ago(64 * 12 + 8);
        assert_eq!(calculate_score("M", senior, None, today()).code(), 97);
        assert_eq!(
            calculate_score("m", senior, Some("entre 15 e 25 anos"), today()).code(),
            98
        );
    }

    #[test]
    fn test_long_gender_words_are_unspecified() {
        let senior = born_months_ago(70 * 12);
        assert_eq!(
            calculate_score("feminino", senior, Some("mais de 35 anos"), today()),
            EligibilityScore::Unspecified
        );
        assert_eq!(
            calculate_score("", senior, None, today()),
            EligibilityScore::Unspecified
        );
    }

    #[test]
    fn test_unknown_bucket_counts_as_zero() {
        let senior = born_months_ago(66 * 12);
        assert_eq!(
            calculate_score("f", senior, Some("não sei"), today()),
            EligibilityScore::FemaleAssistance
        );
    }

    #[test]
    fn test_serializes_as_plain_code() {
        let json = serde_json::to_string(&EligibilityScore::MaleRetirement).unwrap();
        assert_eq!(json, "98");
    }
}
