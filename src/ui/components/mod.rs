pub mod kpi_card;
pub mod load_card;
pub mod status_timeline;
pub mod toast;

pub use kpi_card::KpiCard;
pub use load_card::LoadCard;
pub use status_timeline::StatusTimeline;
