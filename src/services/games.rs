use anyhow::Context;
use chrono::Utc;
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::database::{self, DbConn, DbPool, NewShot};
use crate::domain::{Game, GameId, GameType, PlayerMode, Shot, ShotDraft, UserId};
use crate::errors::{GameError, GameResult};

/// Options chosen on the new-game form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    pub game_type: GameType,
    pub player_mode: PlayerMode,
    #[serde(default)]
    pub player_a_name: Option<String>,
    #[serde(default)]
    pub player_b_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub game: Game,
    pub shots: Vec<Shot>,
}

/// Game lifecycle: setup, shot logging, racks, completion
pub struct GameService {
    pool: DbPool,
}

impl GameService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn start_game(&self, user_id: &UserId, setup: &GameSetup) -> GameResult<Game> {
        let mut conn = self.connection()?;

        let player_a_id = match non_blank(&setup.player_a_name) {
            Some(name) => Some(database::players::insert_player(&mut conn, user_id, name)?.id),
            None => None,
        };
        let player_b_id = match (setup.player_mode, non_blank(&setup.player_b_name)) {
            (PlayerMode::Double, Some(name)) => {
                Some(database::players::insert_player(&mut conn, user_id, name)?.id)
            }
            _ => None,
        };

        let game = database::games::insert_game(
            &mut conn,
            user_id,
            setup.game_type,
            setup.player_mode,
            player_a_id,
            player_b_id,
            Utc::now().naive_utc(),
        )?;

        info!("User {} started {} game {}", user_id, game.game_type, game.id);
        Ok(game)
    }

    pub fn log_shot(&self, user_id: &UserId, game_id: GameId, draft: &ShotDraft) -> GameResult<Shot> {
        let mut conn = self.connection()?;
        let tx = begin_write(&mut conn)?;
        let game = self.load_game(&tx, user_id, game_id)?;
        ensure_in_progress(&game)?;

        let shot_number = database::shots::next_shot_number(&tx, game_id)?;
        let is_break_shot = draft.resolve_break_shot(shot_number);
        draft.validate(game.game_type, is_break_shot)?;

        let new_shot = NewShot {
            game_id,
            player_id: game.player_a_id,
            shot_number,
            rack: game.current_rack,
            shot_type: draft.shot_type,
            ball_number: draft.ball_number,
            cut_angle: draft.cut_angle,
            distance: draft.distance,
            table_position: draft.table_position,
            spin: draft.spin(),
            power_level: draft.power_level,
            outcome: draft.outcome,
            cue_ball_control: draft.cue_ball_control,
            error_type: draft.error_type,
            confidence_rating: draft.confidence_rating,
            strategic_intent: draft.strategic_intent,
            notes: draft.notes.clone().filter(|n| !n.trim().is_empty()),
            is_break_shot,
            balls_pocketed_on_break: if is_break_shot { draft.balls_pocketed_on_break } else { 0 },
            break_spread_quality: is_break_shot.then_some(draft.break_spread_quality),
        };

        let shot = database::shots::insert_shot(&tx, &new_shot)?;
        tx.commit().context("Failed to commit shot")?;
        info!("Logged shot #{} ({}) in game {}", shot.shot_number, draft.outcome, game_id);
        Ok(shot)
    }

    /// Records who took the rack and moves on to the next one
    pub fn finish_rack(&self, user_id: &UserId, game_id: GameId, won: bool) -> GameResult<Game> {
        let mut conn = self.connection()?;
        let tx = begin_write(&mut conn)?;
        let game = self.load_game(&tx, user_id, game_id)?;
        ensure_in_progress(&game)?;
        if !game.game_type.tracks_racks() {
            return Err(GameError::RacksNotTracked(game_id));
        }

        if !database::games::record_rack_result(&tx, user_id, game_id, won)? {
            return Err(GameError::NotFound(game_id));
        }
        let updated = self.load_game(&tx, user_id, game_id)?;
        tx.commit().context("Failed to commit rack result")?;

        info!(
            "Game {} rack {} {}: score {} - {}",
            game_id,
            game.current_rack,
            if won { "won" } else { "lost" },
            updated.team_a_score,
            updated.team_b_score
        );
        Ok(updated)
    }

    /// Finishes a game or a free-training session
    pub fn finish_game(&self, user_id: &UserId, game_id: GameId) -> GameResult<Game> {
        let mut conn = self.connection()?;
        let tx = begin_write(&mut conn)?;
        let game = self.load_game(&tx, user_id, game_id)?;
        ensure_in_progress(&game)?;

        if !database::games::mark_completed(&tx, user_id, game_id, Utc::now().naive_utc())? {
            return Err(GameError::NotFound(game_id));
        }
        let completed = self.load_game(&tx, user_id, game_id)?;
        tx.commit().context("Failed to commit game completion")?;

        info!("Game {} completed", game_id);
        Ok(completed)
    }

    pub fn delete_game(&self, user_id: &UserId, game_id: GameId) -> GameResult<()> {
        let mut conn = self.connection()?;
        if !database::games::delete_game(&mut conn, user_id, game_id)? {
            return Err(GameError::NotFound(game_id));
        }
        info!("Game {} deleted", game_id);
        Ok(())
    }

    pub fn recent_games(&self, user_id: &UserId, limit: usize) -> GameResult<Vec<Game>> {
        let mut conn = self.connection()?;
        Ok(database::games::list_recent(&mut conn, user_id, limit)?)
    }

    pub fn game_detail(&self, user_id: &UserId, game_id: GameId) -> GameResult<GameDetail> {
        let mut conn = self.connection()?;
        let game = self.load_game(&mut conn, user_id, game_id)?;
        let shots = database::shots::list_by_game(&mut conn, game_id)?;
        Ok(GameDetail { game, shots })
    }

    fn connection(&self) -> GameResult<DbConn> {
        Ok(database::get_connection(&self.pool)?)
    }

    fn load_game(&self, conn: &Connection, user_id: &UserId, game_id: GameId) -> GameResult<Game> {
        database::games::find_by_id(conn, user_id, game_id)?.ok_or(GameError::NotFound(game_id))
    }
}

/// Takes the write lock up front so concurrent updates of one game apply one after another
fn begin_write(conn: &mut DbConn) -> GameResult<Transaction<'_>> {
    Ok(conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to start write transaction")?)
}

fn ensure_in_progress(game: &Game) -> GameResult<()> {
    if game.is_completed() {
        return Err(GameError::AlreadyCompleted(game.id));
    }
    Ok(())
}

fn non_blank(name: &Option<String>) -> Option<&str> {
    name.as_deref().map(str::trim).filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseSettings;
    use crate::database::{create_memory_pool, create_pool, get_connection, setup};
    use crate::domain::{HorizontalSpin, ShotOutcome, ShotValidationError, Spin, VerticalSpin};
    use std::path::PathBuf;

    fn service() -> GameService {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::reset_database(&mut conn).unwrap();
        drop(conn);
        GameService::new(pool)
    }

    fn setup_for(game_type: GameType) -> GameSetup {
        GameSetup {
            game_type,
            player_mode: PlayerMode::Single,
            player_a_name: Some("Alex".to_string()),
            player_b_name: Some("Ignored".to_string()),
        }
    }

    #[test]
    fn test_start_game_creates_players_per_mode() {
        let service = service();
        let user = UserId::new("u1");

        let single = service.start_game(&user, &setup_for(GameType::EightBall)).unwrap();
        assert_eq!(single.player_a_name.as_deref(), Some("Alex"));
        assert!(single.player_b_id.is_none());

        let double = service
            .start_game(
                &user,
                &GameSetup {
                    game_type: GameType::NineBall,
                    player_mode: PlayerMode::Double,
                    player_a_name: Some("  ".to_string()),
                    player_b_name: Some("Jess".to_string()),
                },
            )
            .unwrap();
        assert!(double.player_a_id.is_none());
        assert_eq!(double.player_b_name.as_deref(), Some("Jess"));
    }

    #[test]
    fn test_shots_are_numbered_and_tagged_with_rack() {
        let service = service();
        let user = UserId::new("u1");
        let game = service.start_game(&user, &setup_for(GameType::NineBall)).unwrap();

        let first = service.log_shot(&user, game.id, &ShotDraft::default()).unwrap();
        service.finish_rack(&user, game.id, true).unwrap();
        let draft = ShotDraft {
            horizontal_spin: HorizontalSpin::Left,
            vertical_spin: VerticalSpin::Top,
            outcome: ShotOutcome::Miss,
            balls_pocketed_on_break: 4,
            ..ShotDraft::default()
        };
        let second = service.log_shot(&user, game.id, &draft).unwrap();

        assert_eq!((first.shot_number, first.rack), (1, 1));
        assert!(first.is_break_shot);
        assert_eq!(first.break_spread_quality, Some(5));
        assert_eq!(first.player_id, game.player_a_id);

        assert_eq!((second.shot_number, second.rack), (2, 2));
        assert!(!second.is_break_shot);
        assert_eq!(second.balls_pocketed_on_break, Some(0));
        assert_eq!(second.break_spread_quality, None);
        assert_eq!(second.spin, Some(Spin::TopLeft));

        let detail = service.game_detail(&user, game.id).unwrap();
        assert_eq!(detail.shots.len(), 2);
    }

    #[test]
    fn test_invalid_shot_is_rejected() {
        let service = service();
        let user = UserId::new("u1");
        let game = service.start_game(&user, &setup_for(GameType::NineBall)).unwrap();

        let draft = ShotDraft { ball_number: Some(12), ..ShotDraft::default() };
        let err = service.log_shot(&user, game.id, &draft).unwrap_err();

        assert!(matches!(
            err,
            GameError::InvalidShot(ShotValidationError::BallNumber { number: 12, .. })
        ));
        assert!(service.game_detail(&user, game.id).unwrap().shots.is_empty());
    }

    #[test]
    fn test_rack_scoring() {
        let service = service();
        let user = UserId::new("u1");
        let game = service.start_game(&user, &setup_for(GameType::TenBall)).unwrap();

        service.finish_rack(&user, game.id, true).unwrap();
        service.finish_rack(&user, game.id, false).unwrap();
        let game = service.finish_rack(&user, game.id, true).unwrap();

        assert_eq!((game.team_a_score, game.team_b_score), (2, 1));
        assert_eq!(game.current_rack, 4);
    }

    #[test]
    fn test_free_training_has_no_racks() {
        let service = service();
        let user = UserId::new("u1");
        let game = service.start_game(&user, &setup_for(GameType::FreeTraining)).unwrap();

        let err = service.finish_rack(&user, game.id, true).unwrap_err();
        assert!(matches!(err, GameError::RacksNotTracked(_)));

        let finished = service.finish_game(&user, game.id).unwrap();
        assert!(finished.is_completed());
        assert!(!finished.is_won());
    }

    #[test]
    fn test_completed_game_is_frozen() {
        let service = service();
        let user = UserId::new("u1");
        let game = service.start_game(&user, &setup_for(GameType::EightBall)).unwrap();
        service.finish_game(&user, game.id).unwrap();

        assert!(matches!(
            service.log_shot(&user, game.id, &ShotDraft::default()),
            Err(GameError::AlreadyCompleted(_))
        ));
        assert!(matches!(
            service.finish_rack(&user, game.id, true),
            Err(GameError::AlreadyCompleted(_))
        ));
        assert!(matches!(
            service.finish_game(&user, game.id),
            Err(GameError::AlreadyCompleted(_))
        ));
    }

    #[test]
    fn test_other_users_games_are_not_found() {
        let service = service();
        let owner = UserId::new("owner");
        let stranger = UserId::new("stranger");
        let game = service.start_game(&owner, &setup_for(GameType::EightBall)).unwrap();

        assert!(matches!(
            service.log_shot(&stranger, game.id, &ShotDraft::default()),
            Err(GameError::NotFound(_))
        ));
        assert!(matches!(service.delete_game(&stranger, game.id), Err(GameError::NotFound(_))));
        assert!(service.recent_games(&stranger, 5).unwrap().is_empty());

        service.delete_game(&owner, game.id).unwrap();
        assert!(matches!(service.game_detail(&owner, game.id), Err(GameError::NotFound(_))));
    }

    fn remove_database(path: &PathBuf) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[test]
    fn test_concurrent_racks_and_shots_are_all_recorded() {
        let path = std::env::temp_dir().join(format!("cue_tracker_concurrency_{}.db", std::process::id()));
        remove_database(&path);
        let pool = create_pool(&DatabaseSettings {
            path: path.display().to_string(),
            max_connections: 8,
        })
        .unwrap();
        setup::reset_database(&mut get_connection(&pool).unwrap()).unwrap();
        let service = GameService::new(pool);
        let user = UserId::new("u1");
        let game = service.start_game(&user, &setup_for(GameType::NineBall)).unwrap();

        let (threads, rounds) = (8, 10);
        std::thread::scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|| {
                    for _ in 0..rounds {
                        service.finish_rack(&user, game.id, true).unwrap();
                        service.log_shot(&user, game.id, &ShotDraft::default()).unwrap();
                    }
                });
            }
        });

        let detail = service.game_detail(&user, game.id).unwrap();
        remove_database(&path);

        let total = threads * rounds;
        assert_eq!(detail.game.team_a_score, total);
        assert_eq!(detail.game.current_rack, total + 1);
        let numbers: Vec<i32> = detail.shots.iter().map(|s| s.shot_number).collect();
        assert_eq!(numbers, (1..=total).collect::<Vec<_>>());
    }
}
