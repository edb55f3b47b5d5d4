use crate::errors::ValidationError;

use super::types::{percentage, PlayerStatRecord, RawStatLine, ShotCategory, ShotLine};

/// Validates the raw counts and builds the complete record.
///
/// Categories are checked lay-up, three-point, free-throw; the first one whose
/// made count exceeds its attempts is reported and nothing is derived.
pub fn validate_and_derive(raw: &RawStatLine) -> Result<PlayerStatRecord, ValidationError> {
    check_categories(raw)?;
    let player_name = validate_player_name(&raw.player_name)?;
    Ok(build_record(raw, player_name))
}

fn check_categories(raw: &RawStatLine) -> Result<(), ValidationError> {
    for (category, shots) in raw.shot_lines() {
        check_made_within_attempts(category, shots)?;
    }
    Ok(())
}

fn check_made_within_attempts(
    category: ShotCategory,
    shots: ShotLine,
) -> Result<(), ValidationError> {
    if shots.is_consistent() {
        return Ok(());
    }
    Err(ValidationError::MadeExceedsAttempts {
        category,
        made: shots.made,
        attempts: shots.attempts,
    })
}

fn validate_player_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingPlayerName);
    }
    Ok(trimmed.to_string())
}

fn normalize_team(team: Option<&str>) -> Option<String> {
    team.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn build_record(raw: &RawStatLine, player_name: String) -> PlayerStatRecord {
    let (field_goal_attempts, field_goals_made) = field_goal_totals(raw);

    PlayerStatRecord {
        player_name,
        team: normalize_team(raw.team.as_deref()),
        layup_attempts: raw.layup_attempts,
        layup_made: raw.layup_made,
        three_point_attempts: raw.three_point_attempts,
        three_point_made: raw.three_point_made,
        free_throw_attempts: raw.free_throw_attempts,
        free_throw_made: raw.free_throw_made,
        field_goal_attempts,
        field_goals_made,
        points: total_points(raw),
        field_goal_percentage: percentage(field_goals_made, field_goal_attempts),
        layup_percentage: raw.shot_line(ShotCategory::Layup).percentage(),
        three_point_percentage: raw.shot_line(ShotCategory::ThreePoint).percentage(),
        free_throw_percentage: raw.shot_line(ShotCategory::FreeThrow).percentage(),
    }
}

/// Summed in `u64`, which holds three `u32` categories exactly.
fn field_goal_totals(raw: &RawStatLine) -> (u64, u64) {
    raw.shot_lines()
        .iter()
        .fold((0, 0), |(attempts, made), (_, shots)| {
            (attempts + u64::from(shots.attempts), made + u64::from(shots.made))
        })
}

fn total_points(raw: &RawStatLine) -> u64 {
    raw.shot_lines()
        .iter()
        .map(|(category, shots)| u64::from(shots.made) * u64::from(category.point_value()))
        .sum()
}
