use std::fmt;

use super::widgets::{BarRows, or_dash};
use crate::presentation::view_models::{
    BatchResultViewModel, DashboardViewModel, RunSummaryViewModel, TrendRowViewModel,
};

pub struct RunSummaryView<'a> {
    data: &'a RunSummaryViewModel,
}

impl<'a> RunSummaryView<'a> {
    pub fn new(data: &'a RunSummaryViewModel) -> Self {
        Self { data }
    }
}

impl fmt::Display for RunSummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.data.has_run {
            return writeln!(f, "  No runs recorded.");
        }
        writeln!(f, "  Type:           {}", or_dash(self.data.run_type.as_deref()))?;
        writeln!(f, "  Processed:      {}", self.data.count_processed)?;
        writeln!(f, "  Auto-updated:   {}", self.data.auto_updates)?;
        writeln!(f, "  Manual review:  {}", self.data.manual_reviews)?;
        writeln!(f, "  Started:        {}", or_dash(self.data.started_at.as_deref()))?;
        writeln!(f, "  Finished:       {}", or_dash(self.data.finished_at.as_deref()))
    }
}

pub struct TrendView<'a> {
    rows: &'a [TrendRowViewModel],
}

impl<'a> TrendView<'a> {
    pub fn new(rows: &'a [TrendRowViewModel]) -> Self {
        Self { rows }
    }
}

impl fmt::Display for TrendView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "  (no runs)");
        }
        writeln!(f, "  {:<12} {:>6} {:>7}", "DATE", "AUTO", "MANUAL")?;
        for row in self.rows {
            writeln!(
                f,
                "  {:<12} {:>6} {:>7}",
                row.date, row.auto_updates, row.manual_reviews
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Latest run")?;
        write!(f, "{}", RunSummaryView::new(&self.latest_run))?;
        match self.avg_pcs {
            Some(avg) => writeln!(f, "\nAverage PCS: {avg:.1}")?,
            None => writeln!(f, "\nAverage PCS: N/A")?,
        }
        writeln!(f, "\nDrift distribution")?;
        write!(f, "{}", BarRows::new(&self.drift_bars))?;
        writeln!(f, "\nPCS distribution")?;
        write!(f, "{}", BarRows::new(&self.pcs_bars))?;
        writeln!(f, "\nRecent runs")?;
        write!(f, "{}", TrendView::new(&self.trend))?;
        writeln!(f, "\nPending reviews: {}", self.pending_reviews)
    }
}

impl fmt::Display for BatchResultViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Batch: {}", self.kind)?;
        if let Some(run) = &self.latest_run {
            writeln!(f, "Latest run")?;
            write!(f, "{}", RunSummaryView::new(run))?;
        }
        Ok(())
    }
}
