use crate::context::ExecutionContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{DoctorCheckViewModel, StatusLevel};
use anyhow::Result;
use provdash_client::Backend;
use provdash_runtime::config::{LOG_FILE_NAME, resolve_data_dir};

fn check(name: &str, level: StatusLevel, detail: impl Into<String>) -> DoctorCheckViewModel {
    DoctorCheckViewModel {
        name: name.to_string(),
        level,
        detail: detail.into(),
    }
}

/// Reports every check; an unreachable backend is shown, not returned as
/// an error.
pub async fn handle(ctx: &ExecutionContext) -> Result<()> {
    let mut checks = Vec::new();

    let config_path = ctx.config_path().display().to_string();
    checks.push(if ctx.config_exists() {
        check("config", StatusLevel::Success, config_path)
    } else {
        check(
            "config",
            StatusLevel::Info,
            format!("{config_path} (not found, using defaults)"),
        )
    });

    let base_url = &ctx.config.backend.base_url;
    let backend = match ctx.client() {
        Ok(client) => match client.health().await {
            Ok(ack) => check(
                "backend",
                StatusLevel::Success,
                format!("{base_url} ({})", ack.status.as_deref().unwrap_or("ok")),
            ),
            Err(err) => check("backend", StatusLevel::Error, format!("{base_url}: {err}")),
        },
        Err(err) => check("backend", StatusLevel::Error, format!("{base_url}: {err}")),
    };
    checks.push(backend);

    let report_dir = ctx.report_dir();
    checks.push(if report_dir.is_dir() {
        check("reports", StatusLevel::Success, report_dir.display().to_string())
    } else {
        check(
            "reports",
            StatusLevel::Info,
            format!("{} (created on first download)", report_dir.display()),
        )
    });

    match resolve_data_dir(None) {
        Ok(data_dir) => checks.push(check(
            "log",
            StatusLevel::Info,
            data_dir.join(LOG_FILE_NAME).display().to_string(),
        )),
        Err(err) => checks.push(check("log", StatusLevel::Warning, err.to_string())),
    }

    ctx.render(presenters::present_doctor(checks))
}
