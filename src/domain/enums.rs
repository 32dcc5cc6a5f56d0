use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a stored or submitted string is not a member of its taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed taxonomy whose wire and storage form is a fixed string.
macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

taxonomy! {
    GameType {
        EightBall => "8-ball",
        NineBall => "9-ball",
        TenBall => "10-ball",
        FreeTraining => "free-training",
    }
}

impl GameType {
    /// Highest object ball number on the table, `None` when balls are not tracked
    pub fn max_ball_number(&self) -> Option<i32> {
        match self {
            GameType::EightBall => Some(15),
            GameType::NineBall => Some(9),
            GameType::TenBall => Some(10),
            GameType::FreeTraining => None,
        }
    }

    /// Free training has no racks and no score
    pub fn tracks_racks(&self) -> bool {
        !matches!(self, GameType::FreeTraining)
    }
}

taxonomy! {
    PlayerMode {
        Single => "single",
        Double => "double",
    }
}

taxonomy! {
    ShotType {
        Attack => "attack",
        Defense => "defense",
    }
}

taxonomy! {
    /// Cut angle in eighths notation, 8/8 being a full-ball hit
    CutAngle {
        EightEighths => "8/8",
        SevenEighths => "7/8",
        SixEighths => "6/8",
        FiveEighths => "5/8",
        FourEighths => "4/8",
        ThreeEighths => "3/8",
        TwoEighths => "2/8",
        OneEighth => "1/8",
    }
}

taxonomy! {
    Distance {
        Short => "short",
        Long => "long",
    }
}

taxonomy! {
    TablePosition {
        Open => "open",
        Rail => "rail",
        Bank => "bank",
    }
}

taxonomy! {
    HorizontalSpin {
        None => "none",
        Left => "left",
        Right => "right",
    }
}

taxonomy! {
    VerticalSpin {
        None => "none",
        Top => "top",
        Bottom => "bottom",
    }
}

taxonomy! {
    /// Stored spin category, composed from the two independent axes
    Spin {
        None => "none",
        Top => "top",
        Bottom => "bottom",
        Left => "left",
        Right => "right",
        TopLeft => "top_left",
        TopRight => "top_right",
        BottomLeft => "bottom_left",
        BottomRight => "bottom_right",
    }
}

impl Spin {
    pub fn compose(horizontal: HorizontalSpin, vertical: VerticalSpin) -> Self {
        match (vertical, horizontal) {
            (VerticalSpin::None, HorizontalSpin::None) => Spin::None,
            (VerticalSpin::None, HorizontalSpin::Left) => Spin::Left,
            (VerticalSpin::None, HorizontalSpin::Right) => Spin::Right,
            (VerticalSpin::Top, HorizontalSpin::None) => Spin::Top,
            (VerticalSpin::Bottom, HorizontalSpin::None) => Spin::Bottom,
            (VerticalSpin::Top, HorizontalSpin::Left) => Spin::TopLeft,
            (VerticalSpin::Top, HorizontalSpin::Right) => Spin::TopRight,
            (VerticalSpin::Bottom, HorizontalSpin::Left) => Spin::BottomLeft,
            (VerticalSpin::Bottom, HorizontalSpin::Right) => Spin::BottomRight,
        }
    }
}

taxonomy! {
    ShotOutcome {
        Pocketed => "pocketed",
        Safety => "safety",
        Fail => "fail",
        Miss => "miss",
        Scratch => "scratch",
    }
}

taxonomy! {
    CueBallControl {
        OnTarget => "on_target",
        SafeZone => "safe_zone",
        OutOfLine => "out_of_line",
    }
}

taxonomy! {
    ErrorType {
        None => "none",
        Aim => "aim",
        Power => "power",
        SpinDeflection => "spin_deflection",
        Mental => "mental",
    }
}

taxonomy! {
    StrategicIntent {
        Positioning => "positioning",
        Safety => "safety",
        Breakout => "breakout",
        StraightShot => "straight_shot",
    }
}

/// Power levels 1-5 folded into three bands for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerBand {
    Low,
    Medium,
    High,
}

impl PowerBand {
    pub fn from_level(level: i32) -> Self {
        if level <= 2 {
            PowerBand::Low
        } else if level <= 4 {
            PowerBand::Medium
        } else {
            PowerBand::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerBand::Low => "Low (1-2)",
            PowerBand::Medium => "Medium (3-4)",
            PowerBand::High => "High (5)",
        }
    }
}
