// src/services/retention_job.rs

use anyhow::{Context, Result};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::services::analytics_service::AnalyticsService;

/// Agenda a limpeza periódica de page views antigas.
/// `cron` usa 6 campos: "seg min hora dia mês dia_da_semana" (UTC).
pub async fn start_retention_scheduler(service: AnalyticsService, cron: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = retention_job(service, cron)?;
    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("✓ Job de retenção agendado (cron: {})", cron);

    Ok(scheduler)
}

fn retention_job(service: AnalyticsService, cron: &str) -> Result<Job> {
    Job::new_async(cron, move |_uuid, _l| {
        let service = service.clone();

        Box::pin(async move {
            info!("⏰ Limpeza de analytics disparada");
            // Falha no job não pode derrubar o servidor
            if let Err(e) = service.cleanup().await {
                error!("Limpeza de analytics falhou: {}", e);
            }
        })
    })
    .with_context(|| format!("Expressão cron inválida para RETENTION_CRON: '{}'", cron))
}
