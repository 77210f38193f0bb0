pub mod common;
pub mod dashboard;
pub mod provider;
pub mod result;
pub mod review;
pub mod system;
pub mod widgets;

pub use common::{Guidance, StatusBadge, StatusLevel};
pub use dashboard::{BatchResultViewModel, DashboardViewModel, RunSummaryViewModel, TrendRowViewModel};
pub use provider::{
    EnrichmentViewModel, FieldExplanationViewModel, FieldRowViewModel, OcrViewModel,
    PcsComponentViewModel, ProviderDetailViewModel, ProviderListViewModel, ProviderRowViewModel,
    QaRowViewModel, SectionViewModel,
};
pub use result::CommandResultViewModel;
pub use review::{
    ItemExplanationResultViewModel, ItemExplanationViewModel, ReviewItemViewModel,
    ReviewOutcomeViewModel, ReviewQueueViewModel,
};
pub use system::{
    CancelledViewModel, ConfigInitViewModel, ConfigViewModel, DoctorCheckViewModel,
    DoctorViewModel, NoticeViewModel, ReportViewModel,
};
pub use widgets::{BarViewModel, DriftChipViewModel, PcsBadgeViewModel, ProgressViewModel};
