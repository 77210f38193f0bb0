use provdash_types::{BatchKind, RunStats, RunSummary, TrendPoint};

use super::widgets::distribution_to_bars;
use crate::presentation::view_models::{
    BatchResultViewModel, CommandResultViewModel, DashboardViewModel, Guidance,
    RunSummaryViewModel, StatusBadge, TrendRowViewModel,
};

/// The last `len` runs, oldest first, as the backend ordered them.
pub fn trend_series(points: &[TrendPoint], len: usize) -> Vec<TrendRowViewModel> {
    let start = points.len().saturating_sub(len);
    points[start..]
        .iter()
        .map(|p| TrendRowViewModel {
            date: p.date.clone(),
            auto_updates: p.auto_updates,
            manual_reviews: p.manual_reviews,
        })
        .collect()
}

pub fn run_summary(run: &RunSummary) -> RunSummaryViewModel {
    RunSummaryViewModel {
        has_run: run.has_run(),
        run_type: run.run_type.clone(),
        count_processed: run.count_processed,
        auto_updates: run.auto_updates,
        manual_reviews: run.manual_reviews,
        started_at: run.started_at.clone(),
        finished_at: run.finished_at.clone(),
    }
}

pub fn build_dashboard(stats: &RunStats, pending_reviews: usize, trend_len: usize) -> DashboardViewModel {
    DashboardViewModel {
        latest_run: run_summary(&stats.latest_run),
        avg_pcs: stats.avg_pcs,
        drift_bars: distribution_to_bars(&stats.drift_distribution),
        pcs_bars: distribution_to_bars(&stats.pcs_distribution),
        trend: trend_series(&stats.trend, trend_len),
        pending_reviews,
    }
}

pub fn present_dashboard(
    stats: &RunStats,
    pending_reviews: usize,
    trend_len: usize,
) -> CommandResultViewModel<DashboardViewModel> {
    let content = build_dashboard(stats, pending_reviews, trend_len);
    let mut result = CommandResultViewModel::new(content);

    if !stats.latest_run.has_run() {
        result = result
            .with_badge(StatusBadge::info("No batch has run yet"))
            .with_suggestion(
                Guidance::new("Start a validation run").with_command("provdash batch --kind daily"),
            );
    } else if pending_reviews > 0 {
        result = result
            .with_badge(StatusBadge::warning(format!(
                "{pending_reviews} item(s) awaiting manual review"
            )))
            .with_suggestion(Guidance::new("Work through the queue").with_command("provdash reviews"));
    }

    result
}

pub fn present_batch_result(
    kind: BatchKind,
    stats: Option<&RunStats>,
) -> CommandResultViewModel<BatchResultViewModel> {
    let content = BatchResultViewModel {
        kind: kind.to_string(),
        latest_run: stats.map(|s| run_summary(&s.latest_run)),
    };
    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::success(provdash_runtime::store::BATCH_COMPLETE_MESSAGE))
        .with_suggestion(Guidance::new("Review what the run flagged").with_command("provdash reviews"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str) -> TrendPoint {
        TrendPoint {
            id: None,
            date: date.to_string(),
            auto_updates: 1,
            manual_reviews: 0,
        }
    }

    #[test]
    fn test_trend_keeps_most_recent_in_order() {
        let points: Vec<TrendPoint> = (1..=7).map(|d| point(&format!("2026-10-0{d}"))).collect();
        let dates: Vec<String> = trend_series(&points, 5).into_iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec!["2026-10-03", "2026-10-04", "2026-10-05", "2026-10-06", "2026-10-07"]
        );
    }

    #[test]
    fn test_short_trend_is_kept_whole() {
        let points = vec![point("2026-10-01"), point("2026-10-02")];
        assert_eq!(trend_series(&points, 5).len(), 2);
        assert!(trend_series(&[], 5).is_empty());
    }
}
