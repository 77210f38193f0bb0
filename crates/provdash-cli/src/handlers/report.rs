use crate::context::ExecutionContext;
use crate::presentation::presenters;
use anyhow::{Context, Result};
use chrono::Local;
use provdash_client::Backend;
use provdash_runtime::save_report;
use std::path::PathBuf;

pub async fn handle(ctx: &ExecutionContext, output: Option<PathBuf>) -> Result<()> {
    let client = ctx.client()?;
    let report = client
        .download_report()
        .await
        .context("Failed to download report")?;

    let dir = output.unwrap_or_else(|| ctx.report_dir());
    let path = save_report(&report, &dir, Local::now().date_naive())
        .await
        .with_context(|| format!("Failed to save report into {}", dir.display()))?;

    ctx.render(presenters::present_report(path, &report))
}
