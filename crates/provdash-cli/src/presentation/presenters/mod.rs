pub mod dashboard;
pub mod provider;
pub mod review;
pub mod system;
pub mod widgets;

pub use dashboard::{build_dashboard, present_batch_result, present_dashboard, trend_series};
pub use provider::{
    build_provider_detail, build_provider_list, present_field_explanation, present_provider_detail,
    present_provider_list,
};
pub use review::{
    build_review_queue, present_item_explanation, present_review_outcome, present_review_queue,
};
pub use system::{
    notice, present_cancelled, present_config, present_config_init, present_doctor, present_report,
};
pub use widgets::{distribution_to_bars, drift_chip, pcs_badge, progress};
