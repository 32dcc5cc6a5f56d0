pub mod settings;

pub use settings::{AnalyticsSettings, AppConfig, DatabaseSettings};
