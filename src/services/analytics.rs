use anyhow::Result;
use log::info;

use crate::analytics::{self, AnalyticsReport};
use crate::config::settings::AnalyticsSettings;
use crate::database::{self, DbPool};
use crate::domain::{GameId, UserId};

/// Loads one user's history and runs the aggregation over it
pub struct AnalyticsService {
    pool: DbPool,
    settings: AnalyticsSettings,
}

impl AnalyticsService {
    pub fn new(pool: DbPool, settings: AnalyticsSettings) -> Self {
        Self { pool, settings }
    }

    pub fn report(&self, user_id: &UserId) -> Result<AnalyticsReport> {
        let mut conn = database::get_connection(&self.pool)?;

        let games = database::games::list_by_user(&mut conn, user_id)?;
        let game_ids: Vec<GameId> = games.iter().map(|g| g.id).collect();
        let shots = database::shots::list_by_game_ids(&mut conn, &game_ids)?;
        info!(
            "Building analytics for user {}: {} games, {} shots",
            user_id,
            games.len(),
            shots.len()
        );

        Ok(analytics::aggregate(&games, &shots, &self.settings))
    }
}
