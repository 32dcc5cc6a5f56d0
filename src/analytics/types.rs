use serde::{Deserialize, Serialize};

/// Headline numbers of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub total_games: usize,
    pub total_shots: usize,
    pub avg_shots_per_game: u32,
    pub games_won: usize,
    pub games_lost: usize,
    pub win_rate: u32,
    pub successful_shots: usize,
    pub shot_accuracy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeStats {
    pub label: String,
    pub games: usize,
    pub win_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeShare {
    pub label: String,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    /// `YYYY-MM`
    pub month: String,
    /// `Jan 24`
    pub label: String,
    pub games: usize,
    pub shots: usize,
}

/// Success rate of one value of one shot attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotBreakdown {
    pub category: String,
    pub label: String,
    pub total: usize,
    pub successful: usize,
    pub success_rate: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotBreakdowns {
    pub distance: Vec<ShotBreakdown>,
    pub table_position: Vec<ShotBreakdown>,
    pub cut_angle: Vec<ShotBreakdown>,
    pub power_level: Vec<ShotBreakdown>,
    pub spin: Vec<ShotBreakdown>,
    pub cue_ball_control: Vec<ShotBreakdown>,
    pub shot_type: Vec<ShotBreakdown>,
    pub strategic_intent: Vec<ShotBreakdown>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl AccuracyTier {
    pub fn from_accuracy(accuracy: u32) -> Self {
        if accuracy >= 70 {
            AccuracyTier::Excellent
        } else if accuracy >= 50 {
            AccuracyTier::Good
        } else {
            AccuracyTier::NeedsImprovement
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            AccuracyTier::Excellent => "Excellent accuracy!",
            AccuracyTier::Good => "Good accuracy!",
            AccuracyTier::NeedsImprovement => "Room for improvement!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRateTier {
    Great,
    Solid,
    KeepPracticing,
}

impl WinRateTier {
    pub fn from_win_rate(win_rate: u32) -> Self {
        if win_rate >= 60 {
            WinRateTier::Great
        } else if win_rate >= 40 {
            WinRateTier::Solid
        } else {
            WinRateTier::KeepPracticing
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            WinRateTier::Great => "Great win rate!",
            WinRateTier::Solid => "Solid performance!",
            WinRateTier::KeepPracticing => "Keep practicing!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInsights {
    pub accuracy: AccuracyTier,
    pub win_rate: WinRateTier,
}

/// Everything the analytics dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub summary: GameSummary,
    pub game_types: Vec<GameTypeStats>,
    pub outcomes: Vec<OutcomeShare>,
    pub monthly: Vec<MonthlyActivity>,
    pub breakdowns: ShotBreakdowns,
    pub insights: PerformanceInsights,
}
