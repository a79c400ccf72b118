// src/services/analytics_service.rs

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use std::collections::HashMap;

use crate::{
    common::error::AppError,
    db::AnalyticsRepository,
    models::analytics::{
        AnalyticsStats, CleanupDetails, CleanupPreview, CleanupReport, DailyCountRow, DailyViews,
        DateRange, DateRangeQuery, NewPageView,
    },
};

const DEFAULT_RANGE_DAYS: u64 = 30;
const TOP_LIMIT: i64 = 10;
const TOP_USER_AGENTS_LIMIT: i64 = 20;
// Uma entrada por dia é montada em memória; mais que isso é abuso
const MAX_SERIES_DAYS: i64 = 366;

#[derive(Clone)]
pub struct AnalyticsService {
    repo: AnalyticsRepository,
    retention_months: u32,
}

impl AnalyticsService {
    pub fn new(repo: AnalyticsRepository, retention_months: u32) -> Self {
        Self { repo, retention_months }
    }

    pub async fn track(&self, view: NewPageView) -> Result<(), AppError> {
        self.repo.insert_page_view(&view).await
    }

    pub async fn get_stats(&self, query: &DateRangeQuery) -> Result<AnalyticsStats, AppError> {
        let today = Utc::now().date_naive();
        let range = stats_range(query, today)?;
        let today_range = DateRange { start: start_of(today), end: start_of(next_day(today)) };
        let week_range = DateRange {
            start: start_of(days_before(today, 7)),
            end: today_range.end,
        };

        // Snapshot consistente para todos os números do dashboard
        let mut tx = self.repo.pool().begin().await?;

        let total_views = self.repo.count_in_range(&mut *tx, range).await?;
        let unique_sessions = self.repo.count_unique_sessions(&mut *tx, range).await?;
        let today_views = self.repo.count_in_range(&mut *tx, today_range).await?;
        let week_views = self.repo.count_in_range(&mut *tx, week_range).await?;
        let top_pages = self.repo.top_pages(&mut *tx, range, TOP_LIMIT).await?;
        let top_referrers = self.repo.top_referrers(&mut *tx, range, TOP_LIMIT).await?;
        let browsers = self.repo.top_browsers(&mut *tx, range, TOP_LIMIT).await?;
        let user_agents = self.repo.top_user_agents(&mut *tx, range, TOP_USER_AGENTS_LIMIT).await?;

        tx.commit().await?;

        Ok(AnalyticsStats {
            total_views,
            unique_sessions,
            today_views,
            week_views,
            top_pages,
            top_referrers,
            browsers,
            user_agents,
        })
    }

    pub async fn get_daily_views(&self, query: &DateRangeQuery) -> Result<Vec<DailyViews>, AppError> {
        let today = Utc::now().date_naive();
        let (first_day, last_day) = views_days(query, today)?;
        let range = DateRange { start: start_of(first_day), end: start_of(next_day(last_day)) };

        let rows = self.repo.daily_counts(self.repo.pool(), range).await?;

        Ok(fill_daily_series(first_day, last_day, rows))
    }

    pub async fn cleanup_preview(&self) -> Result<CleanupPreview, AppError> {
        let cutoff_date = retention_cutoff(Utc::now(), self.retention_months)?;

        let mut tx = self.repo.pool().begin().await?;
        let total_records = self.repo.count_all(&mut *tx).await?;
        let records_to_delete = self.repo.count_older_than(&mut *tx, cutoff_date).await?;
        let (oldest_record, newest_record) = self.repo.timestamp_bounds(&mut *tx).await?;
        tx.commit().await?;

        Ok(CleanupPreview {
            retention_months: self.retention_months,
            cutoff_date,
            total_records,
            records_to_delete,
            records_to_keep: total_records - records_to_delete,
            oldest_record,
            newest_record,
        })
    }

    /// Apaga tudo que for mais antigo que o período de retenção.
    pub async fn cleanup(&self) -> Result<CleanupReport, AppError> {
        let cutoff_date = retention_cutoff(Utc::now(), self.retention_months)?;

        let mut tx = self.repo.pool().begin().await?;
        let records_before = self.repo.count_all(&mut *tx).await?;
        let deleted_count = self.repo.delete_older_than(&mut *tx, cutoff_date).await?;
        let records_after = self.repo.count_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(
            "🧹 Limpeza de analytics: {} registros removidos (corte {})",
            deleted_count,
            cutoff_date
        );

        Ok(CleanupReport {
            success: true,
            message: format!(
                "Deleted {} records older than {} months",
                deleted_count, self.retention_months
            ),
            details: CleanupDetails {
                cutoff_date,
                deleted_count,
                records_before,
                records_after,
            },
        })
    }
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn next_day(day: NaiveDate) -> NaiveDate {
    day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

fn days_before(day: NaiveDate, days: u64) -> NaiveDate {
    day.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

fn check_order(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if start > end {
        return Err(AppError::InvalidDateRange(format!(
            "startDate ({}) must not be after endDate ({})",
            start, end
        )));
    }
    Ok(())
}

/// Intervalo das estatísticas: `[startDate, endDate + 1 dia)`.
/// Sem parâmetros: últimos 30 dias até o fim de hoje.
pub fn stats_range(query: &DateRangeQuery, today: NaiveDate) -> Result<DateRange, AppError> {
    let start_day = query.start_date.unwrap_or_else(|| days_before(today, DEFAULT_RANGE_DAYS));
    let end_day = query.end_date.unwrap_or(today);
    check_order(start_day, end_day)?;

    Ok(DateRange {
        start: start_of(start_day),
        end: start_of(next_day(end_day)),
    })
}

/// Primeiro e último dia (inclusive) do gráfico diário.
pub fn views_days(query: &DateRangeQuery, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
    let first_day = query.start_date.unwrap_or_else(|| days_before(today, DEFAULT_RANGE_DAYS));
    let last_day = query.end_date.unwrap_or(today);
    check_order(first_day, last_day)?;

    let span = (last_day - first_day).num_days() + 1;
    if span > MAX_SERIES_DAYS {
        return Err(AppError::InvalidDateRange(format!(
            "Date range spans {} days; the daily series allows at most {}",
            span, MAX_SERIES_DAYS
        )));
    }

    Ok((first_day, last_day))
}

/// Uma entrada por dia, com zero onde não houve visita.
pub fn fill_daily_series(first_day: NaiveDate, last_day: NaiveDate, rows: Vec<DailyCountRow>) -> Vec<DailyViews> {
    let by_day: HashMap<NaiveDate, DailyCountRow> = rows.into_iter().map(|row| (row.day, row)).collect();

    first_day
        .iter_days()
        .take_while(|day| *day <= last_day)
        .map(|date| match by_day.get(&date) {
            Some(row) => DailyViews { date, views: row.views, unique_visitors: row.unique_visitors },
            None => DailyViews { date, views: 0, unique_visitors: 0 },
        })
        .collect()
}

/// `now` menos N meses de calendário.
pub fn retention_cutoff(now: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, AppError> {
    now.checked_sub_months(Months::new(months))
        .ok_or_else(|| anyhow::anyhow!("Período de retenção inválido: {} meses", months).into())
}

/// Mesma ordem do script de tracking: Edge e Opera também dizem "Chrome",
/// e o Chrome também diz "Safari".
pub fn detect_browser(user_agent: &str) -> &'static str {
    if user_agent.contains("Edg/") || user_agent.contains("Edge/") {
        "Edge"
    } else if user_agent.contains("OPR/") || user_agent.contains("Opera") {
        "Opera"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Unknown"
    }
}
