use std::path::{Path, PathBuf};

use provdash_client::Report;
use provdash_runtime::{Config, Notice, NoticeLevel};

use crate::presentation::view_models::{
    CancelledViewModel, CommandResultViewModel, ConfigInitViewModel, ConfigViewModel,
    DoctorCheckViewModel, DoctorViewModel, Guidance, NoticeViewModel, ReportViewModel, StatusBadge,
    StatusLevel,
};

pub fn notice(notice: &Notice) -> NoticeViewModel {
    let level = match notice.level {
        NoticeLevel::Info => StatusLevel::Info,
        NoticeLevel::Success => StatusLevel::Success,
        NoticeLevel::Error => StatusLevel::Error,
    };
    NoticeViewModel {
        level,
        text: notice.text.clone(),
    }
}

pub fn present_report(path: PathBuf, report: &Report) -> CommandResultViewModel<ReportViewModel> {
    let badge = StatusBadge::success(format!("Report saved to {}", path.display()));
    let mut result = CommandResultViewModel::new(ReportViewModel {
        path,
        bytes: report.len(),
        content_type: report.content_type.clone(),
    })
    .with_badge(badge);

    if !report.is_pdf() {
        result = result.with_suggestion(Guidance::new(format!(
            "Backend answered with {} rather than a PDF",
            report.content_type
        )));
    }

    result
}

pub fn present_doctor(checks: Vec<DoctorCheckViewModel>) -> CommandResultViewModel<DoctorViewModel> {
    let content = DoctorViewModel { checks };
    let healthy = content.is_healthy();
    let mut result = CommandResultViewModel::new(content);

    if healthy {
        result = result.with_badge(StatusBadge::success("Backend reachable"));
    } else {
        result = result
            .with_badge(StatusBadge::error("Backend unreachable"))
            .with_suggestion(
                Guidance::new("Point provdash at the running backend")
                    .with_command("provdash --base-url http://HOST:PORT doctor"),
            );
    }

    result
}

pub fn present_config(
    path: &Path,
    exists: bool,
    config: &Config,
) -> CommandResultViewModel<ConfigViewModel> {
    let mut result = CommandResultViewModel::new(ConfigViewModel {
        path: path.to_path_buf(),
        exists,
        config: config.clone(),
    });

    if !exists {
        result = result
            .with_badge(StatusBadge::info("No config file; showing defaults"))
            .with_suggestion(Guidance::new("Write one").with_command("provdash config init"));
    }

    result
}

pub fn present_config_init(path: PathBuf, written: bool) -> CommandResultViewModel<ConfigInitViewModel> {
    let badge = if written {
        StatusBadge::success(format!("Wrote {}", path.display()))
    } else {
        StatusBadge::warning(format!("{} already exists", path.display()))
    };
    let mut result = CommandResultViewModel::new(ConfigInitViewModel { path, written }).with_badge(badge);

    if !written {
        result = result.with_suggestion(
            Guidance::new("Overwrite it with defaults").with_command("provdash config init --force"),
        );
    }

    result
}

pub fn present_cancelled(operation: impl Into<String>) -> CommandResultViewModel<CancelledViewModel> {
    let operation = operation.into();
    let badge = StatusBadge::warning(format!("{operation} cancelled"));
    CommandResultViewModel::new(CancelledViewModel { operation }).with_badge(badge)
}
