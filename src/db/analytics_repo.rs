// src/db/analytics_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::analytics::{
        BrowserCount, DailyCountRow, DateRange, NewPageView, PathCount, ReferrerCount,
        UserAgentCount,
    },
};

// O repositório de analytics, responsável por todas as interações com a tabela 'page_views'
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert_page_view(&self, view: &NewPageView) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO page_views (path, referrer, user_agent, browser, session_id, screen_size, language)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
            .bind(&view.path)
            .bind(&view.referrer)
            .bind(&view.user_agent)
            .bind(&view.browser)
            .bind(&view.session_id)
            .bind(&view.screen_size)
            .bind(&view.language)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count_in_range<'e, E>(&self, executor: E, range: DateRange) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM page_views WHERE timestamp >= $1 AND timestamp < $2",
        )
            .bind(range.start)
            .bind(range.end)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn count_unique_sessions<'e, E>(&self, executor: E, range: DateRange) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT session_id) FROM page_views WHERE timestamp >= $1 AND timestamp < $2",
        )
            .bind(range.start)
            .bind(range.end)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn top_pages<'e, E>(&self, executor: E, range: DateRange, limit: i64) -> Result<Vec<PathCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, PathCount>(
            r#"
            SELECT path, COUNT(*) AS count
            FROM page_views
            WHERE timestamp >= $1 AND timestamp < $2
            GROUP BY path
            ORDER BY count DESC, path ASC
            LIMIT $3
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    // Referrer vazio conta como acesso direto
    pub async fn top_referrers<'e, E>(&self, executor: E, range: DateRange, limit: i64) -> Result<Vec<ReferrerCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, ReferrerCount>(
            r#"
            SELECT COALESCE(NULLIF(referrer, ''), 'Direct') AS referrer, COUNT(*) AS count
            FROM page_views
            WHERE timestamp >= $1 AND timestamp < $2
              AND referrer IS NOT NULL
            GROUP BY 1
            ORDER BY count DESC, 1 ASC
            LIMIT $3
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    pub async fn top_browsers<'e, E>(&self, executor: E, range: DateRange, limit: i64) -> Result<Vec<BrowserCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, BrowserCount>(
            r#"
            SELECT COALESCE(NULLIF(browser, ''), 'Unknown') AS browser, COUNT(*) AS count
            FROM page_views
            WHERE timestamp >= $1 AND timestamp < $2
              AND browser IS NOT NULL
            GROUP BY 1
            ORDER BY count DESC, 1 ASC
            LIMIT $3
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    pub async fn top_user_agents<'e, E>(&self, executor: E, range: DateRange, limit: i64) -> Result<Vec<UserAgentCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, UserAgentCount>(
            r#"
            SELECT COALESCE(NULLIF(user_agent, ''), 'Unknown') AS user_agent, COUNT(*) AS count
            FROM page_views
            WHERE timestamp >= $1 AND timestamp < $2
              AND user_agent IS NOT NULL
            GROUP BY 1
            ORDER BY count DESC, 1 ASC
            LIMIT $3
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    // Agrupado por dia (UTC). Dias sem visitas não aparecem; o serviço completa.
    pub async fn daily_counts<'e, E>(&self, executor: E, range: DateRange) -> Result<Vec<DailyCountRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, DailyCountRow>(
            r#"
            SELECT
                (timestamp AT TIME ZONE 'UTC')::date AS day,
                COUNT(*) AS views,
                COUNT(DISTINCT session_id) AS unique_visitors
            FROM page_views
            WHERE timestamp >= $1 AND timestamp < $2
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    pub async fn count_all<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM page_views")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn count_older_than<'e, E>(&self, executor: E, cutoff: DateTime<Utc>) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM page_views WHERE timestamp < $1")
            .bind(cutoff)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    // (mais antigo, mais recente)
    pub async fn timestamp_bounds<'e, E>(
        &self,
        executor: E,
    ) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bounds: (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(timestamp), MAX(timestamp) FROM page_views")
                .fetch_one(executor)
                .await?;

        Ok(bounds)
    }

    pub async fn delete_older_than<'e, E>(&self, executor: E, cutoff: DateTime<Utc>) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM page_views WHERE timestamp < $1")
            .bind(cutoff)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
