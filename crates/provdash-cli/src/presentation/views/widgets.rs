//! Plain-text widgets shared by the console views.

use std::fmt;

use crate::presentation::view_models::{
    BarViewModel, DriftChipViewModel, PcsBadgeViewModel, ProgressViewModel,
};

pub const BAR_WIDTH: usize = 24;

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Gauge of `width` cells for a fraction in [0, 1].
pub struct ProgressBar<'a> {
    model: &'a ProgressViewModel,
    width: usize,
}

impl<'a> ProgressBar<'a> {
    pub fn new(model: &'a ProgressViewModel, width: usize) -> Self {
        Self { model, width }
    }
}

impl fmt::Display for ProgressBar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", gauge(self.model.fraction, self.width))
    }
}

pub(crate) fn gauge(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub struct BarRows<'a> {
    bars: &'a [BarViewModel],
}

impl<'a> BarRows<'a> {
    pub fn new(bars: &'a [BarViewModel]) -> Self {
        Self { bars }
    }
}

impl fmt::Display for BarRows<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.bars.is_empty() {
            return writeln!(f, "  (no data)");
        }
        let label_width = self.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        for bar in self.bars {
            writeln!(
                f,
                "  {:<label_width$}  {}  {}",
                bar.label,
                gauge(bar.fraction, BAR_WIDTH),
                bar.count
            )?;
        }
        Ok(())
    }
}

pub struct Badge<'a>(pub &'a PcsBadgeViewModel);

impl fmt::Display for Badge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.0.label())
    }
}

pub struct DriftChip<'a>(pub &'a DriftChipViewModel);

impl fmt::Display for DriftChip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.0.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_widths() {
        assert_eq!(gauge(0.0, 4), "░░░░");
        assert_eq!(gauge(0.5, 4), "██░░");
        assert_eq!(gauge(1.0, 4), "████");
        assert_eq!(gauge(7.0, 4), "████");
    }
}
