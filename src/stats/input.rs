use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::RawStatLine;
use crate::errors::ValidationError;

/// Stat submission as typed into the form: every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatForm {
    #[serde(alias = "name", deserialize_with = "text_or_number")]
    pub player_name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub team: String,
    #[serde(deserialize_with = "text_or_number")]
    pub layup_attempts: String,
    #[serde(deserialize_with = "text_or_number")]
    pub layup_made: String,
    #[serde(deserialize_with = "text_or_number")]
    pub three_point_attempts: String,
    #[serde(deserialize_with = "text_or_number")]
    pub three_point_made: String,
    #[serde(deserialize_with = "text_or_number")]
    pub free_throw_attempts: String,
    #[serde(deserialize_with = "text_or_number")]
    pub free_throw_made: String,
}

impl StatForm {
    /// Fails only when a count is numeric but too large to store.
    pub fn coerce(&self) -> Result<RawStatLine, ValidationError> {
        Ok(RawStatLine {
            player_name: self.player_name.clone(),
            team: Some(self.team.clone()),
            layup_attempts: form_count("layupAttempts", &self.layup_attempts)?,
            layup_made: form_count("layupMade", &self.layup_made)?,
            three_point_attempts: form_count("threePointAttempts", &self.three_point_attempts)?,
            three_point_made: form_count("threePointMade", &self.three_point_made)?,
            free_throw_attempts: form_count("freeThrowAttempts", &self.free_throw_attempts)?,
            free_throw_made: form_count("freeThrowMade", &self.free_throw_made)?,
        })
    }
}

/// Text to count: non-numeric, negative or non-finite input becomes `0`,
/// fractions are truncated. `None` when the number does not fit a `u32`.
pub fn coerce_count(text: &str) -> Option<u32> {
    match text.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => {
            let whole = n.trunc();
            (whole <= u32::MAX as f64).then_some(whole as u32)
        }
        _ => Some(0),
    }
}

fn form_count(field: &'static str, text: &str) -> Result<u32, ValidationError> {
    coerce_count(text).ok_or_else(|| ValidationError::CountOutOfRange {
        field,
        value: text.trim().to_string(),
    })
}

/// Accepts JSON strings, numbers or null for a text form field.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
