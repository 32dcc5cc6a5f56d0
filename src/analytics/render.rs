use colored::Colorize;
use std::fmt;

use super::types::{AnalyticsReport, ShotBreakdown};

/// Plain-terminal version of the analytics dashboard
pub struct ReportView<'a>(pub &'a AnalyticsReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let summary = &report.summary;

        writeln!(f, "{}", "Performance summary".bold().underline())?;
        writeln!(
            f,
            "  Games: {} ({} won, {} lost)",
            summary.total_games, summary.games_won, summary.games_lost
        )?;
        writeln!(f, "  Win rate: {}", rate(summary.win_rate, 60, 40))?;
        writeln!(
            f,
            "  Shots: {} ({} successful, {} per game)",
            summary.total_shots, summary.successful_shots, summary.avg_shots_per_game
        )?;
        writeln!(f, "  Accuracy: {}", rate(summary.shot_accuracy, 70, 50))?;
        writeln!(
            f,
            "  {} {}",
            report.insights.accuracy.headline().cyan(),
            report.insights.win_rate.headline().cyan()
        )?;

        if !report.game_types.is_empty() {
            writeln!(f, "\n{}", "Game types".bold())?;
            for stats in &report.game_types {
                writeln!(
                    f,
                    "  {:<16} {:>4} games  {}",
                    stats.label,
                    stats.games,
                    rate(stats.win_rate, 60, 40)
                )?;
            }
        }

        if !report.outcomes.is_empty() {
            writeln!(f, "\n{}", "Outcomes".bold())?;
            for share in &report.outcomes {
                writeln!(f, "  {:<16} {:>4}  {:>3}%", share.label, share.count, share.percentage)?;
            }
        }

        if !report.monthly.is_empty() {
            writeln!(f, "\n{}", "Monthly activity".bold())?;
            for month in &report.monthly {
                writeln!(
                    f,
                    "  {:<16} {:>4} games {:>5} shots",
                    month.label, month.games, month.shots
                )?;
            }
        }

        let breakdowns = &report.breakdowns;
        for rows in [
            &breakdowns.distance,
            &breakdowns.table_position,
            &breakdowns.cut_angle,
            &breakdowns.power_level,
            &breakdowns.spin,
            &breakdowns.cue_ball_control,
            &breakdowns.shot_type,
            &breakdowns.strategic_intent,
        ] {
            write_breakdown(f, rows)?;
        }

        Ok(())
    }
}

fn write_breakdown(f: &mut fmt::Formatter<'_>, rows: &[ShotBreakdown]) -> fmt::Result {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    writeln!(f, "\n{}", first.category.bold())?;
    for row in rows {
        writeln!(
            f,
            "  {:<16} {:>4}/{:<4} {}",
            row.label,
            row.successful,
            row.total,
            rate(row.success_rate, 70, 50)
        )?;
    }
    Ok(())
}

fn rate(value: u32, good: u32, fair: u32) -> String {
    let text = format!("{value}%");
    if value >= good {
        text.green().to_string()
    } else if value >= fair {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}
