use serde::Serialize;
use std::path::PathBuf;

use super::common::StatusLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportViewModel {
    pub path: PathBuf,
    pub bytes: usize,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorViewModel {
    pub checks: Vec<DoctorCheckViewModel>,
}

impl DoctorViewModel {
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.level != StatusLevel::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorCheckViewModel {
    pub name: String,
    pub level: StatusLevel,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigViewModel {
    pub path: PathBuf,
    pub exists: bool,
    /// The effective configuration, flags applied.
    pub config: provdash_runtime::Config,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigInitViewModel {
    pub path: PathBuf,
    pub written: bool,
}

/// An interactive prompt was declined; no request went out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelledViewModel {
    pub operation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeViewModel {
    pub level: StatusLevel,
    pub text: String,
}
