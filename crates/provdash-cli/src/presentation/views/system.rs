use std::fmt;

use crate::presentation::view_models::{
    CancelledViewModel, ConfigInitViewModel, ConfigViewModel, DoctorViewModel, ReportViewModel,
    StatusLevel,
};

impl fmt::Display for ReportViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} ({} bytes, {})", self.path.display(), self.bytes, self.content_type)
    }
}

impl fmt::Display for DoctorViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for check in &self.checks {
            let mark = match check.level {
                StatusLevel::Success => "✓",
                StatusLevel::Info => "·",
                StatusLevel::Warning => "!",
                StatusLevel::Error => "✗",
            };
            writeln!(f, "  {} {:<12} {}", mark, check.name, check.detail)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConfigViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "# {}", self.path.display())?;
        match self.config.to_toml() {
            Ok(toml) => write!(f, "{toml}"),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Display for ConfigInitViewModel {
    fn fmt(&self, _f: &mut fmt::Formatter) -> fmt::Result {
        Ok(())
    }
}

impl fmt::Display for CancelledViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Nothing was sent to the backend.")
    }
}
