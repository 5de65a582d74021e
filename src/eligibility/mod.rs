//! Retirement eligibility engine.
//!
//! Pure calculators over `(gender, birth_date, contribution_time, today)`.
//! Nothing here reads the clock or touches I/O; the request handler picks
//! `today` once and passes it in.
//!
//! The score and the benefit date deliberately disagree on two points and
//! must stay that way: the score measures age in calendar months and reads
//! contribution time as a bucket phrase, while the benefit date uses a
//! year-only age and a plain integer year count.

pub mod age;
pub mod benefit_date;
pub mod contribution_time;
pub mod score;

use chrono::NaiveDate;
use serde::Serialize;

pub use age::{age_in_months, age_in_years, parse_birth_date};
pub use benefit_date::{calculate_benefit_date, BenefitRequirement};
pub use contribution_time::{parse_contribution_time, parse_contribution_years};
pub use score::{calculate_score, EligibilityScore};

/// The three form fields the engine looks at.
#[derive(Debug, Clone, Copy)]
pub struct RetirementProfile<'a> {
    pub gender: &'a str,
    pub birth_date: NaiveDate,
    pub contribution_time: Option<&'a str>,
}

/// Derived fields stored alongside a retirement lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedEligibility {
    pub score: EligibilityScore,
    pub date_benefit_was_granted: Option<NaiveDate>,
}

impl<'a> RetirementProfile<'a> {
    /// Build a profile from raw form text; `None` when the birth date is
    /// missing or does not parse. A missing gender counts as empty, which
    /// both calculators treat as unrecognized.
    pub fn from_form(
        gender: Option<&'a str>,
        birth_date: Option<&str>,
        contribution_time: Option<&'a str>,
    ) -> Option<Self> {
        Some(Self {
            gender: gender.unwrap_or_default(),
            birth_date: parse_birth_date(birth_date?)?,
            contribution_time,
        })
    }

    pub fn derive(&self, today: NaiveDate) -> DerivedEligibility {
        DerivedEligibility {
            score: calculate_score(
                self.gender,
                self.birth_date,
                self.contribution_time,
                today,
            ),
            date_benefit_was_granted: calculate_benefit_date(
                self.gender,
                self.birth_date,
                self.contribution_time.unwrap_or_default(),
                today,
            ),
        }
    }
}
