use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::contact::phone_for_storage;
use crate::eligibility::RetirementProfile;

// ============ Database Models ============

/// A retirement (aposentadoria) lead as stored in the `retired` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct RetiredLead {
    pub id: i32,
    pub name: Option<String>,
    /// Phone in E.164 when it was a valid Brazilian number, raw otherwise.
    pub phone: Option<String>,
    pub percentage: Option<String>,
    pub gender: Option<String>,
    /// Birth date text exactly as submitted.
    pub birth_date: Option<String>,
    pub contribution_time: Option<String>,
    pub is_unhealthy: Option<bool>,
    pub is_military: Option<bool>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    /// Eligibility classification code (see `EligibilityScore`).
    pub score: Option<i32>,
    /// Estimated date the lead meets the statutory requirements.
    pub date_benefit_was_granted: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An athletes-rights (direito dos atletas) lead, table `athletes_rights`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct AthletesRightsLead {
    pub id: i32,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_registered_clt: Option<bool>,
    pub had_injury_during_career: Option<bool>,
    pub injury_description: Option<String>,
    pub injury_timing: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============ Request Models ============

/// Body of `POST /retired` (JSON or URL-encoded form). Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateRetiredLead {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub percentage: Option<String>,
    /// `f`/`m` drive the score, `feminino` drives the benefit date.
    pub gender: Option<String>,
    /// `YYYY-MM-DD`, ISO timestamp or `DD/MM/YYYY`.
    pub birth_date: Option<String>,
    /// Bucket phrase ("entre 15 e 20 anos") or a plain year count ("22").
    pub contribution_time: Option<String>,
    pub is_unhealthy: Option<bool>,
    pub is_military: Option<bool>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
}

/// Body of `POST /api/athletes-rights`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateAthletesRightsLead {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_registered_clt: Option<bool>,
    pub had_injury_during_career: Option<bool>,
    pub injury_description: Option<String>,
    pub injury_timing: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
}

/// Error body used by 400/404 responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body used by 401 responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthErrorResponse {
    pub error: String,
    pub message: String,
}

// ============ Insert Models ============

/// Row values for a new retirement lead, derived fields included.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRetiredLead {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub percentage: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub contribution_time: Option<String>,
    pub is_unhealthy: Option<bool>,
    pub is_military: Option<bool>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub score: Option<i32>,
    pub date_benefit_was_granted: Option<NaiveDate>,
}

impl CreateRetiredLead {
    /// Attach the eligibility fields and normalize the phone.
    ///
    /// Both derived fields stay `None` when the birth date is missing or
    /// cannot be read; the lead itself is always kept. A missing gender is
    /// scored like any unrecognized one.
    pub fn into_new_lead(self, today: NaiveDate) -> NewRetiredLead {
        let derived = RetirementProfile::from_form(
            self.gender.as_deref(),
            self.birth_date.as_deref(),
            self.contribution_time.as_deref(),
        )
        .map(|profile| profile.derive(today));

        if derived.is_none() {
            tracing::debug!(
                "Eligibility not computed (birth_date: {:?})",
                self.birth_date
            );
        }

        NewRetiredLead {
            name: self.name,
            phone: phone_for_storage(self.phone),
            percentage: self.percentage,
            gender: self.gender,
            birth_date: self.birth_date,
            contribution_time: self.contribution_time,
            is_unhealthy: self.is_unhealthy,
            is_military: self.is_military,
            utm_source: self.utm_source,
            utm_medium: self.utm_medium,
            utm_campaign: self.utm_campaign,
            utm_content: self.utm_content,
            utm_term: self.utm_term,
            score: derived.map(|d| d.score.code()),
            date_benefit_was_granted: derived.and_then(|d| d.date_benefit_was_granted),
        }
    }
}

impl CreateAthletesRightsLead {
    pub fn normalized(self) -> Self {
        Self {
            phone: phone_for_storage(self.phone),
            ..self
        }
    }
}

/// One row of the `request_logs` audit table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequestLog {
    pub method: String,
    pub url: String,
    pub headers: Value,
    pub body: Option<Value>,
    pub query_params: Value,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
