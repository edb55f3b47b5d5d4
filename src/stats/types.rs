use serde::{Deserialize, Serialize};
use std::fmt;

/// Shot categories tracked per player-game line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotCategory {
    #[serde(rename = "lay-up")]
    Layup,
    #[serde(rename = "three-point")]
    ThreePoint,
    #[serde(rename = "free-throw")]
    FreeThrow,
}

impl ShotCategory {
    /// Validation order: the first failing category is the one reported.
    pub const ALL: [ShotCategory; 3] = [
        ShotCategory::Layup,
        ShotCategory::ThreePoint,
        ShotCategory::FreeThrow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotCategory::Layup => "lay-up",
            ShotCategory::ThreePoint => "three-point",
            ShotCategory::FreeThrow => "free-throw",
        }
    }

    pub fn point_value(&self) -> u32 {
        match self {
            ShotCategory::Layup => 2,
            ShotCategory::ThreePoint => 3,
            ShotCategory::FreeThrow => 1,
        }
    }
}

impl fmt::Display for ShotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotLine {
    pub attempts: u32,
    pub made: u32,
}

impl ShotLine {
    pub fn new(attempts: u32, made: u32) -> Self {
        Self { attempts, made }
    }

    pub fn is_consistent(&self) -> bool {
        self.made <= self.attempts
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.made.into(), self.attempts.into())
    }
}

/// Fraction made/attempts rounded to 4 decimals, `0.0` when nothing was attempted.
pub fn percentage(made: u64, attempts: u64) -> f64 {
    if attempts == 0 {
        return 0.0;
    }
    round_fraction(made as f64 / attempts as f64)
}

/// Rounds to 4 decimals; a negative zero comes back as `0.0`.
pub fn round_fraction(value: f64) -> f64 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Raw counts for one player-game line, as submitted before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStatLine {
    #[serde(alias = "name")]
    pub player_name: String,
    pub team: Option<String>,
    pub layup_attempts: u32,
    pub layup_made: u32,
    pub three_point_attempts: u32,
    pub three_point_made: u32,
    pub free_throw_attempts: u32,
    pub free_throw_made: u32,
}

impl RawStatLine {
    pub fn shot_line(&self, category: ShotCategory) -> ShotLine {
        match category {
            ShotCategory::Layup => ShotLine::new(self.layup_attempts, self.layup_made),
            ShotCategory::ThreePoint => {
                ShotLine::new(self.three_point_attempts, self.three_point_made)
            }
            ShotCategory::FreeThrow => {
                ShotLine::new(self.free_throw_attempts, self.free_throw_made)
            }
        }
    }

    pub fn shot_lines(&self) -> [(ShotCategory, ShotLine); 3] {
        ShotCategory::ALL.map(|category| (category, self.shot_line(category)))
    }
}

/// A validated stat line with every derived field filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatRecord {
    pub player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub layup_attempts: u32,
    pub layup_made: u32,
    pub three_point_attempts: u32,
    pub three_point_made: u32,
    pub free_throw_attempts: u32,
    pub free_throw_made: u32,
    pub field_goal_attempts: u64,
    pub field_goals_made: u64,
    pub points: u64,
    pub field_goal_percentage: f64,
    pub layup_percentage: f64,
    pub three_point_percentage: f64,
    pub free_throw_percentage: f64,
}
