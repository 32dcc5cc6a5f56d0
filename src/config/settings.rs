#[derive(Debug, Clone)]
pub struct AnalyticsSettings {
    /// Number of most recent calendar months shown in the activity chart
    pub monthly_window: usize,
    pub recent_games_limit: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            monthly_window: 6,
            recent_games_limit: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "cue_tracker.db".to_string()),
            max_connections: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub analytics: AnalyticsSettings,
    pub database: DatabaseSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            analytics: AnalyticsSettings::default(),
            database: DatabaseSettings::default(),
        }
    }
}
