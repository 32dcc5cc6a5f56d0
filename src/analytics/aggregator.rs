use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use log::debug;

use super::grouping::{group_in_order, percentage, rounded_ratio, success_breakdown};
use super::labels::{category_label, game_type_label, outcome_label};
use super::types::{
    AccuracyTier, AnalyticsReport, GameSummary, GameTypeStats, MonthlyActivity, OutcomeShare,
    PerformanceInsights, ShotBreakdowns, WinRateTier,
};
use crate::config::settings::AnalyticsSettings;
use crate::domain::{Game, GameId, PowerBand, Shot};

/// Builds the analytics dashboard from one user's games and the shots of those games
pub fn aggregate(games: &[Game], shots: &[Shot], config: &AnalyticsSettings) -> AnalyticsReport {
    debug!("Aggregating {} games and {} shots", games.len(), shots.len());

    let summary = summarize(games, shots);
    let insights = PerformanceInsights {
        accuracy: AccuracyTier::from_accuracy(summary.shot_accuracy),
        win_rate: WinRateTier::from_win_rate(summary.win_rate),
    };

    AnalyticsReport {
        game_types: game_type_stats(games),
        outcomes: outcome_distribution(shots),
        monthly: monthly_activity(games, shots, config.monthly_window),
        breakdowns: shot_breakdowns(shots),
        summary,
        insights,
    }
}

pub fn summarize(games: &[Game], shots: &[Shot]) -> GameSummary {
    let total_games = games.len();
    let total_shots = shots.len();
    let games_won = games.iter().filter(|g| g.is_won()).count();
    let successful_shots = shots.iter().filter(|s| s.is_pocketed()).count();

    GameSummary {
        total_games,
        total_shots,
        avg_shots_per_game: rounded_ratio(total_shots, total_games),
        games_won,
        games_lost: total_games - games_won,
        win_rate: percentage(games_won, total_games),
        successful_shots,
        shot_accuracy: percentage(successful_shots, total_shots),
    }
}

#[derive(Default)]
struct GameTypeTally {
    games: usize,
    wins: usize,
}

pub fn game_type_stats(games: &[Game]) -> Vec<GameTypeStats> {
    group_in_order(
        games,
        |game| Some(game.game_type),
        |tally: &mut GameTypeTally, game| {
            tally.games += 1;
            if game.is_won() {
                tally.wins += 1;
            }
        },
    )
    .into_iter()
    .map(|(game_type, tally)| GameTypeStats {
        label: game_type_label(game_type.as_str()),
        games: tally.games,
        win_rate: percentage(tally.wins, tally.games),
    })
    .collect()
}

pub fn outcome_distribution(shots: &[Shot]) -> Vec<OutcomeShare> {
    let total_shots = shots.len();

    group_in_order(
        shots,
        |shot| Some(shot.outcome.map_or("unknown", |o| o.as_str())),
        |count: &mut usize, _| *count += 1,
    )
    .into_iter()
    .map(|(outcome, count)| OutcomeShare {
        label: outcome_label(outcome),
        count,
        percentage: percentage(count, total_shots),
    })
    .collect()
}

#[derive(Default)]
struct MonthTally {
    games: usize,
    shots: usize,
}

/// Games and shots per calendar month of `started_at`, oldest first, last `window` months only
pub fn monthly_activity(games: &[Game], shots: &[Shot], window: usize) -> Vec<MonthlyActivity> {
    let shots_per_game = count_shots_per_game(shots);
    let mut months: BTreeMap<(i32, u32), MonthTally> = BTreeMap::new();

    for game in games {
        let key = (game.started_at.year(), game.started_at.month());
        let tally = months.entry(key).or_default();
        tally.games += 1;
        tally.shots += shots_per_game.get(&game.id).copied().unwrap_or(0);
    }

    let skip = months.len().saturating_sub(window);
    months
        .into_iter()
        .skip(skip)
        .map(|((year, month), tally)| MonthlyActivity {
            month: format!("{:04}-{:02}", year, month),
            label: month_label(year, month),
            games: tally.games,
            shots: tally.shots,
        })
        .collect()
}

fn count_shots_per_game(shots: &[Shot]) -> HashMap<GameId, usize> {
    let mut counts = HashMap::new();
    for shot in shots {
        *counts.entry(shot.game_id).or_insert(0) += 1;
    }
    counts
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b %y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}

pub fn shot_breakdowns(shots: &[Shot]) -> ShotBreakdowns {
    ShotBreakdowns {
        distance: success_breakdown(shots, "Distance", |s| s.distance, |v| {
            category_label(v.as_str())
        }),
        table_position: success_breakdown(shots, "Position", |s| s.table_position, |v| {
            category_label(v.as_str())
        }),
        cut_angle: success_breakdown(shots, "Cut Angle", |s| s.cut_angle, |v| {
            category_label(v.as_str())
        }),
        power_level: success_breakdown(
            shots,
            "Power Level",
            |s| s.power_level.map(PowerBand::from_level),
            |band| band.label().to_string(),
        ),
        spin: success_breakdown(shots, "Spin Type", |s| s.spin, |v| {
            category_label(v.as_str())
        }),
        cue_ball_control: success_breakdown(shots, "Cue Ball Control", |s| s.cue_ball_control, |v| {
            category_label(v.as_str())
        }),
        shot_type: success_breakdown(shots, "Shot Type", |s| s.shot_type, |v| {
            category_label(v.as_str())
        }),
        strategic_intent: success_breakdown(shots, "Strategic Intent", |s| s.strategic_intent, |v| {
            category_label(v.as_str())
        }),
    }
}
