pub mod dashboard_summary;

pub use dashboard_summary::DashboardSummary;
