use serde::Serialize;

use super::widgets::BarViewModel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViewModel {
    pub latest_run: RunSummaryViewModel,
    pub avg_pcs: Option<f64>,
    pub drift_bars: Vec<BarViewModel>,
    pub pcs_bars: Vec<BarViewModel>,
    pub trend: Vec<TrendRowViewModel>,
    pub pending_reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummaryViewModel {
    /// False when the backend has never run a batch.
    pub has_run: bool,
    pub run_type: Option<String>,
    pub count_processed: u64,
    pub auto_updates: u64,
    pub manual_reviews: u64,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRowViewModel {
    pub date: String,
    pub auto_updates: u64,
    pub manual_reviews: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResultViewModel {
    pub kind: String,
    pub latest_run: Option<RunSummaryViewModel>,
}
