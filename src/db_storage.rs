use crate::errors::{AppError, ResultExt};
use crate::models::{
    AthletesRightsLead, CreateAthletesRightsLead, NewRequestLog, NewRetiredLead, RetiredLead,
};
use sqlx::PgPool;

/// Database storage for leads and the request audit log.
#[derive(Clone)]
pub struct LeadStorage {
    pool: PgPool,
}

impl LeadStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a retirement lead and return the stored row.
    pub async fn insert_retired(&self, lead: &NewRetiredLead) -> Result<RetiredLead, sqlx::Error> {
        sqlx::query_as::<_, RetiredLead>(
            r#"
            INSERT INTO retired (
                name, phone, percentage, gender, birth_date, contribution_time,
                is_unhealthy, is_military,
                utm_source, utm_medium, utm_campaign, utm_content, utm_term,
                score, date_benefit_was_granted
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(&lead.percentage)
        .bind(&lead.gender)
        .bind(&lead.birth_date)
        .bind(&lead.contribution_time)
        .bind(lead.is_unhealthy)
        .bind(lead.is_military)
        .bind(&lead.utm_source)
        .bind(&lead.utm_medium)
        .bind(&lead.utm_campaign)
        .bind(&lead.utm_content)
        .bind(&lead.utm_term)
        .bind(lead.score)
        .bind(lead.date_benefit_was_granted)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_retired(&self, id: i32) -> Result<Option<RetiredLead>, sqlx::Error> {
        sqlx::query_as::<_, RetiredLead>("SELECT * FROM retired WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert an athletes-rights lead and return the stored row.
    pub async fn insert_athletes_rights(
        &self,
        lead: &CreateAthletesRightsLead,
    ) -> Result<AthletesRightsLead, sqlx::Error> {
        sqlx::query_as::<_, AthletesRightsLead>(
            r#"
            INSERT INTO athletes_rights (
                name, phone, is_registered_clt, had_injury_during_career,
                injury_description, injury_timing,
                utm_source, utm_medium, utm_campaign, utm_content, utm_term
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(lead.is_registered_clt)
        .bind(lead.had_injury_during_career)
        .bind(&lead.injury_description)
        .bind(&lead.injury_timing)
        .bind(&lead.utm_source)
        .bind(&lead.utm_medium)
        .bind(&lead.utm_campaign)
        .bind(&lead.utm_content)
        .bind(&lead.utm_term)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_athletes_rights(
        &self,
        id: i32,
    ) -> Result<Option<AthletesRightsLead>, sqlx::Error> {
        sqlx::query_as::<_, AthletesRightsLead>("SELECT * FROM athletes_rights WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_request_log(&self, log: &NewRequestLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO request_logs (method, url, headers, body, query_params, ip, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&log.method)
        .bind(&log.url)
        .bind(&log.headers)
        .bind(&log.body)
        .bind(&log.query_params)
        .bind(&log.ip)
        .bind(&log.user_agent)
        .execute(&self.pool)
        .await
        .context(format!("storing request log for {} {}", log.method, log.url))?;

        Ok(())
    }
}
