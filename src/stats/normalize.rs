//! Maps every known stored stat document shape into [`StoredStatRecord`].
//!
//! Writers over the years have used different key names (`fgPct`, `threePa`,
//! `pts`, ...), nested Mongoose `stats` sub-documents, and percentages saved as
//! display strings. All of that is resolved here so projection only ever sees
//! one shape.

use serde_json::{Map, Value};
use std::fmt;

use super::types::{round_fraction, PlayerStatRecord};

const PLAYER_NAME: &[&str] = &["playerName", "name"];
const TEAM: &[&str] = &["team"];
const POINTS: &[&str] = &["points", "pts"];
const LAYUP_ATTEMPTS: &[&str] = &["layupAttempts", "twoPtsAttempts"];
const LAYUP_MADE: &[&str] = &["layupMade", "twoPtsMade"];
const THREE_POINT_ATTEMPTS: &[&str] = &["threePointAttempts", "threePa"];
const THREE_POINT_MADE: &[&str] = &["threePointMade", "threePm"];
const FREE_THROW_ATTEMPTS: &[&str] = &["freeThrowAttempts", "fta"];
const FREE_THROW_MADE: &[&str] = &["freeThrowMade", "ftm"];
const FIELD_GOAL_ATTEMPTS: &[&str] = &["fieldGoalAttempts", "fga"];
const FIELD_GOALS_MADE: &[&str] = &["fieldGoalsMade", "fgm"];
const FIELD_GOAL_PERCENTAGE: &[&str] = &["fieldGoalPercentage", "fgPct"];
const LAYUP_PERCENTAGE: &[&str] = &["layupPercentage", "twoPtPct"];
const THREE_POINT_PERCENTAGE: &[&str] = &["threePointPercentage", "threePct"];
const FREE_THROW_PERCENTAGE: &[&str] = &["freeThrowPercentage", "ftPct"];

/// Mongoose-era documents keep their counters under this key.
const NESTED_STATS: &str = "stats";

/// Canonical stored shape. Every field is optional because stored documents
/// may be partial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredStatRecord {
    pub player_name: Option<String>,
    pub team: Option<String>,
    pub points: Option<u64>,
    pub layup_attempts: Option<u32>,
    pub layup_made: Option<u32>,
    pub three_point_attempts: Option<u32>,
    pub three_point_made: Option<u32>,
    pub free_throw_attempts: Option<u32>,
    pub free_throw_made: Option<u32>,
    pub field_goal_attempts: Option<u64>,
    pub field_goals_made: Option<u64>,
    pub field_goal_percentage: Option<f64>,
    pub layup_percentage: Option<f64>,
    pub three_point_percentage: Option<f64>,
    pub free_throw_percentage: Option<f64>,
}

impl From<&PlayerStatRecord> for StoredStatRecord {
    fn from(record: &PlayerStatRecord) -> Self {
        Self {
            player_name: Some(record.player_name.clone()),
            team: record.team.clone(),
            points: Some(record.points),
            layup_attempts: Some(record.layup_attempts),
            layup_made: Some(record.layup_made),
            three_point_attempts: Some(record.three_point_attempts),
            three_point_made: Some(record.three_point_made),
            free_throw_attempts: Some(record.free_throw_attempts),
            free_throw_made: Some(record.free_throw_made),
            field_goal_attempts: Some(record.field_goal_attempts),
            field_goals_made: Some(record.field_goals_made),
            field_goal_percentage: Some(record.field_goal_percentage),
            layup_percentage: Some(record.layup_percentage),
            three_point_percentage: Some(record.three_point_percentage),
            free_throw_percentage: Some(record.free_throw_percentage),
        }
    }
}

/// A stored field that could not be read and was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedField {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for MalformedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    pub record: StoredStatRecord,
    pub warnings: Vec<MalformedField>,
}

/// Reads any stored document into the canonical shape. Never fails; unreadable
/// fields become `None` and are reported in `warnings`.
pub fn normalize(document: &Value) -> NormalizedRecord {
    let Some(top) = document.as_object() else {
        return NormalizedRecord {
            record: StoredStatRecord::default(),
            warnings: vec![MalformedField {
                field: "document",
                reason: format!("expected an object, found {}", value_kind(document)),
            }],
        };
    };

    let mut reader = DocumentReader::new(top);
    let record = StoredStatRecord {
        player_name: reader.text("playerName", PLAYER_NAME),
        team: reader.text("team", TEAM),
        points: reader.total("points", POINTS),
        layup_attempts: reader.count("layupAttempts", LAYUP_ATTEMPTS),
        layup_made: reader.count("layupMade", LAYUP_MADE),
        three_point_attempts: reader.count("threePointAttempts", THREE_POINT_ATTEMPTS),
        three_point_made: reader.count("threePointMade", THREE_POINT_MADE),
        free_throw_attempts: reader.count("freeThrowAttempts", FREE_THROW_ATTEMPTS),
        free_throw_made: reader.count("freeThrowMade", FREE_THROW_MADE),
        field_goal_attempts: reader.total("fieldGoalAttempts", FIELD_GOAL_ATTEMPTS),
        field_goals_made: reader.total("fieldGoalsMade", FIELD_GOALS_MADE),
        field_goal_percentage: reader.fraction("fieldGoalPercentage", FIELD_GOAL_PERCENTAGE),
        layup_percentage: reader.fraction("layupPercentage", LAYUP_PERCENTAGE),
        three_point_percentage: reader.fraction("threePointPercentage", THREE_POINT_PERCENTAGE),
        free_throw_percentage: reader.fraction("freeThrowPercentage", FREE_THROW_PERCENTAGE),
    };

    NormalizedRecord {
        record,
        warnings: reader.warnings,
    }
}

struct DocumentReader<'a> {
    top: &'a Map<String, Value>,
    nested: Option<&'a Map<String, Value>>,
    warnings: Vec<MalformedField>,
}

impl<'a> DocumentReader<'a> {
    fn new(top: &'a Map<String, Value>) -> Self {
        Self {
            top,
            nested: top.get(NESTED_STATS).and_then(Value::as_object),
            warnings: Vec::new(),
        }
    }

    /// First non-null value under any alias, top level before the nested block.
    fn lookup(&self, aliases: &[&str]) -> Option<&'a Value> {
        let sources = std::iter::once(self.top).chain(self.nested);
        for source in sources {
            for alias in aliases {
                match source.get(*alias) {
                    Some(Value::Null) | None => continue,
                    Some(value) => return Some(value),
                }
            }
        }
        None
    }

    fn text(&mut self, field: &'static str, aliases: &[&str]) -> Option<String> {
        let value = self.lookup(aliases)?;
        match value {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            other => self.reject(field, format!("expected text, found {}", value_kind(other))),
        }
    }

    /// Per-category counter, bounded like the raw input.
    fn count(&mut self, field: &'static str, aliases: &[&str]) -> Option<u32> {
        let total = self.total(field, aliases)?;
        match u32::try_from(total) {
            Ok(count) => Some(count),
            Err(_) => self.reject(field, format!("count {} is out of range", total)),
        }
    }

    /// Summed counters (totals, points) that can exceed a single category.
    fn total(&mut self, field: &'static str, aliases: &[&str]) -> Option<u64> {
        let value = self.lookup(aliases)?;
        match read_number(value) {
            Some(n) if n < 0.0 => self.reject(field, format!("negative count {}", n)),
            Some(n) if n.trunc() < u64::MAX as f64 => Some(n.trunc() as u64),
            Some(n) => self.reject(field, format!("count {} is out of range", n)),
            None => self.reject(field, format!("expected a count, found {}", value_kind(value))),
        }
    }

    fn fraction(&mut self, field: &'static str, aliases: &[&str]) -> Option<f64> {
        let value = self.lookup(aliases)?;
        let parsed = match value {
            Value::String(s) if s.trim_end().ends_with('%') => {
                parse_finite(s.trim().trim_end_matches('%')).map(|n| n / 100.0)
            }
            other => read_number(other).map(scale_fraction),
        };
        match parsed {
            Some(n) if n >= 0.0 => Some(round_fraction(n)),
            Some(n) => self.reject(field, format!("negative percentage {}", n)),
            None => {
                let reason = format!("expected a percentage, found {}", value_kind(value));
                self.reject(field, reason)
            }
        }
    }

    fn reject<T>(&mut self, field: &'static str, reason: String) -> Option<T> {
        self.warnings.push(MalformedField { field, reason });
        None
    }
}

/// Numbers above 1 can only be percentages that were already multiplied by 100.
fn scale_fraction(value: f64) -> f64 {
    if value > 1.0 { value / 100.0 } else { value }
}

fn read_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_finite(s),
        _ => None,
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_document_round_trips() {
        let document = json!({
            "playerName": "Plaza #70",
            "team": "ACBSUI PANTHERS",
            "layupAttempts": 4,
            "layupMade": 3,
            "fieldGoalPercentage": 0.75
        });
        let normalized = normalize(&document);

        assert!(normalized.warnings.is_empty());
        assert_eq!(normalized.record.player_name.as_deref(), Some("Plaza #70"));
        assert_eq!(normalized.record.layup_attempts, Some(4));
        assert_eq!(normalized.record.layup_made, Some(3));
        assert_eq!(normalized.record.field_goal_percentage, Some(0.75));
        assert_eq!(normalized.record.three_point_attempts, None);
    }

    #[test]
    fn test_firestore_legacy_keys() {
        let document = json!({
            "name": "Almario #19",
            "team": "ACC GREEN SERPENTS",
            "pts": 8,
            "fga": 5,
            "fgm": 1,
            "fgPct": 0.2,
            "twoPtsMade": 1,
            "twoPtsAttempts": 3,
            "twoPtPct": 0.333,
            "threePa": 2,
            "threePm": 1,
            "threePct": 0.5,
            "fta": 0
        });
        let record = normalize(&document).record;

        assert_eq!(record.player_name.as_deref(), Some("Almario #19"));
        assert_eq!(record.points, Some(8));
        assert_eq!(record.field_goal_attempts, Some(5));
        assert_eq!(record.field_goals_made, Some(1));
        assert_eq!(record.field_goal_percentage, Some(0.2));
        assert_eq!(record.layup_attempts, Some(3));
        assert_eq!(record.layup_made, Some(1));
        assert_eq!(record.layup_percentage, Some(0.333));
        assert_eq!(record.three_point_percentage, Some(0.5));
        assert_eq!(record.free_throw_attempts, Some(0));
        assert_eq!(record.free_throw_made, None);
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let record = normalize(&json!({"playerName": "A", "name": "B"})).record;
        assert_eq!(record.player_name.as_deref(), Some("A"));
    }

    #[test]
    fn test_mongoose_nested_stats_block() {
        let document = json!({
            "name": "Remoto #23",
            "team": "ACBSUI PANTHERS",
            "position": "Guard",
            "stats": { "threePa": 2, "threePm": 2, "threePct": "70.0%" }
        });
        let record = normalize(&document).record;

        assert_eq!(record.three_point_attempts, Some(2));
        assert_eq!(record.three_point_made, Some(2));
        assert_eq!(record.three_point_percentage, Some(0.7));
    }

    #[test]
    fn test_display_string_and_premultiplied_percentages() {
        let record = normalize(&json!({
            "fgPct": "20.22%",
            "threePct": 50,
            "ftPct": "0.25"
        }))
        .record;

        assert_eq!(record.field_goal_percentage, Some(0.2022));
        assert_eq!(record.three_point_percentage, Some(0.5));
        assert_eq!(record.free_throw_percentage, Some(0.25));
    }

    #[test]
    fn test_malformed_fields_become_warnings() {
        let normalized = normalize(&json!({
            "name": ["not", "text"],
            "layupAttempts": "lots",
            "threePm": -2,
            "fgPct": true,
            "fta": null
        }));

        assert_eq!(normalized.record, StoredStatRecord::default());
        let fields: Vec<&str> = normalized.warnings.iter().map(|w| w.field).collect();
        assert_eq!(
            fields,
            vec!["playerName", "layupAttempts", "threePointMade", "fieldGoalPercentage"]
        );
    }

    #[test]
    fn test_totals_beyond_a_single_category_are_kept() {
        let normalized = normalize(&json!({
            "fieldGoalAttempts": 6_000_000_000u64,
            "pts": 9_000_000_000u64,
            "layupAttempts": 5_000_000_000u64
        }));

        assert_eq!(normalized.record.field_goal_attempts, Some(6_000_000_000));
        assert_eq!(normalized.record.points, Some(9_000_000_000));
        assert_eq!(normalized.record.layup_attempts, None);
        assert_eq!(normalized.warnings.len(), 1);
        assert_eq!(normalized.warnings[0].field, "layupAttempts");
    }

    #[test]
    fn test_negative_zero_percentages_read_as_zero() {
        let record = normalize(&json!({"fgPct": -0.0, "threePct": "-0%"})).record;

        let field_goal = record.field_goal_percentage.unwrap();
        let three_point = record.three_point_percentage.unwrap();
        assert!(field_goal == 0.0 && field_goal.is_sign_positive());
        assert!(three_point == 0.0 && three_point.is_sign_positive());
    }

    #[test]
    fn test_non_object_document() {
        let normalized = normalize(&json!("garbage"));
        assert_eq!(normalized.record, StoredStatRecord::default());
        assert_eq!(normalized.warnings.len(), 1);
        assert_eq!(normalized.warnings[0].field, "document");
    }

    #[test]
    fn test_empty_object_has_no_warnings() {
        let normalized = normalize(&json!({}));
        assert_eq!(normalized, NormalizedRecord::default());
    }
}
