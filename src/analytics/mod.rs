pub mod aggregator;
pub mod grouping;
pub mod labels;
pub mod render;
pub mod types;

pub use aggregator::aggregate;
pub use grouping::{percentage, rounded_ratio};
pub use render::ReportView;
pub use types::{
    AnalyticsReport, GameSummary, GameTypeStats, MonthlyActivity, OutcomeShare,
    PerformanceInsights, ShotBreakdown, ShotBreakdowns,
};
