use serde::Serialize;
use serde_json::Value;

use super::normalize::{normalize, MalformedField, StoredStatRecord};

/// Display-ready row shown in the master stats table and written to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRow {
    pub name: String,
    pub team: String,
    pub points: u64,
    pub field_goal_attempts: u64,
    pub field_goals_made: u64,
    pub field_goal_percentage: String,
    pub layup_attempts: u32,
    pub layup_made: u32,
    pub layup_percentage: String,
    pub three_point_attempts: u32,
    pub three_point_made: u32,
    pub three_point_percentage: String,
    pub free_throw_attempts: u32,
    pub free_throw_made: u32,
    pub free_throw_percentage: String,
}

impl StatRow {
    /// Cells in table column order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.team.clone(),
            self.points.to_string(),
            self.field_goal_attempts.to_string(),
            self.field_goals_made.to_string(),
            self.field_goal_percentage.clone(),
            self.layup_attempts.to_string(),
            self.layup_made.to_string(),
            self.layup_percentage.clone(),
            self.three_point_attempts.to_string(),
            self.three_point_made.to_string(),
            self.three_point_percentage.clone(),
            self.free_throw_attempts.to_string(),
            self.free_throw_made.to_string(),
            self.free_throw_percentage.clone(),
        ]
    }
}

pub fn project(record: &StoredStatRecord) -> StatRow {
    StatRow {
        name: record.player_name.clone().unwrap_or_default(),
        team: record.team.clone().unwrap_or_default(),
        points: record.points.unwrap_or(0),
        field_goal_attempts: record.field_goal_attempts.unwrap_or(0),
        field_goals_made: record.field_goals_made.unwrap_or(0),
        field_goal_percentage: format_percentage(record.field_goal_percentage.unwrap_or(0.0)),
        layup_attempts: record.layup_attempts.unwrap_or(0),
        layup_made: record.layup_made.unwrap_or(0),
        layup_percentage: format_percentage(record.layup_percentage.unwrap_or(0.0)),
        three_point_attempts: record.three_point_attempts.unwrap_or(0),
        three_point_made: record.three_point_made.unwrap_or(0),
        three_point_percentage: format_percentage(record.three_point_percentage.unwrap_or(0.0)),
        free_throw_attempts: record.free_throw_attempts.unwrap_or(0),
        free_throw_made: record.free_throw_made.unwrap_or(0),
        free_throw_percentage: format_percentage(record.free_throw_percentage.unwrap_or(0.0)),
    }
}

/// Normalizes an arbitrary stored document and projects it in one step.
pub fn project_document(document: &Value) -> (StatRow, Vec<MalformedField>) {
    let normalized = normalize(document);
    (project(&normalized.record), normalized.warnings)
}

/// `0.6316` renders as `"63.2%"`.
pub fn format_percentage(fraction: f64) -> String {
    let percent = if fraction.is_finite() { fraction * 100.0 } else { 0.0 };
    // `{:.1}` keeps the sign of anything that rounds to zero
    let percent = if percent.abs() < 0.05 { 0.0 } else { percent };
    format!("{:.1}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{validate_and_derive, RawStatLine};
    use serde_json::json;

    #[test]
    fn test_partial_document_fills_defaults() {
        let document = json!({"name": "Jane", "fieldGoalPercentage": 0.5});
        let (row, warnings) = project_document(&document);

        assert!(warnings.is_empty());
        assert_eq!(row.name, "Jane");
        assert_eq!(row.team, "");
        assert_eq!(row.field_goal_attempts, 0);
        assert_eq!(row.field_goals_made, 0);
        assert_eq!(row.layup_made, 0);
        assert_eq!(row.field_goal_percentage, "50.0%");
        assert_eq!(row.three_point_percentage, "0.0%");
    }

    #[test]
    fn test_projection_is_total() {
        for document in [json!({}), json!(null), json!([1, 2]), json!({"team": {"nested": true}})] {
            let (row, _) = project_document(&document);
            assert_eq!(row.name, "");
            assert_eq!(row.points, 0);
            assert_eq!(row.free_throw_percentage, "0.0%");
        }
    }

    #[test]
    fn test_derived_record_projection() {
        let raw = RawStatLine {
            player_name: "Beltran #16".to_string(),
            team: Some("ACC GREEN SERPENTS".to_string()),
            layup_attempts: 10,
            layup_made: 6,
            three_point_attempts: 5,
            three_point_made: 2,
            free_throw_attempts: 4,
            free_throw_made: 4,
        };
        let record = validate_and_derive(&raw).unwrap();
        let row = project(&StoredStatRecord::from(&record));

        assert_eq!(row.field_goal_percentage, "63.2%");
        assert_eq!(row.layup_percentage, "60.0%");
        assert_eq!(row.three_point_percentage, "40.0%");
        assert_eq!(row.free_throw_percentage, "100.0%");
        assert_eq!(row.cells().len(), 15);
        assert_eq!(row.cells()[1], "ACC GREEN SERPENTS");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(0.125), "12.5%");
        assert_eq!(format_percentage(f64::NAN), "0.0%");
        assert_eq!(format_percentage(-0.0), "0.0%");
        assert_eq!(format_percentage(-0.0001), "0.0%");
    }

    #[test]
    fn test_negative_zero_documents_render_unsigned() {
        let (row, _) = project_document(&json!({"fgPct": -0.0, "ftPct": "-0%"}));
        assert_eq!(row.field_goal_percentage, "0.0%");
        assert_eq!(row.free_throw_percentage, "0.0%");
    }
}
