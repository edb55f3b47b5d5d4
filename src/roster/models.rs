use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RosterError;
use crate::stats::coerce_count;
use crate::stats::filter::{contains_ignore_case, prepare_query};
use crate::stats::input::text_or_number;

/// Roster entry. Linked to stat lines only by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub position: String,
    pub jersey_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_game: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPlayer {
    pub name: String,
    pub position: String,
    pub jersey_number: u32,
    pub team: Option<String>,
    pub last_game: Option<String>,
}

impl NewPlayer {
    pub fn validate(self) -> Result<Player, RosterError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RosterError::MissingName);
        }

        Ok(Player {
            name: name.to_string(),
            position: self.position.trim().to_string(),
            jersey_number: self.jersey_number,
            team: non_blank(self.team.as_deref()),
            last_game: non_blank(self.last_game.as_deref()),
        })
    }
}

/// Player form as typed: every field is text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerForm {
    #[serde(deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub position: String,
    #[serde(alias = "number", deserialize_with = "text_or_number")]
    pub jersey_number: String,
    #[serde(deserialize_with = "text_or_number")]
    pub team: String,
    #[serde(deserialize_with = "text_or_number")]
    pub last_game: String,
}

impl PlayerForm {
    pub fn coerce(&self) -> Result<NewPlayer, RosterError> {
        let jersey_number = coerce_count(&self.jersey_number).ok_or_else(|| {
            RosterError::JerseyNumberOutOfRange(self.jersey_number.trim().to_string())
        })?;

        Ok(NewPlayer {
            name: self.name.clone(),
            position: self.position.clone(),
            jersey_number,
            team: Some(self.team.clone()),
            last_game: Some(self.last_game.clone()),
        })
    }
}

impl Player {
    /// Lenient read of a stored roster document; missing fields default.
    pub fn from_document(document: &Value) -> Self {
        Self {
            name: read_text(document, &["name"]).unwrap_or_default(),
            position: read_text(document, &["position"]).unwrap_or_default(),
            jersey_number: read_text(document, &["jerseyNumber", "number"])
                .and_then(|n| coerce_count(&n))
                .unwrap_or(0),
            team: read_text(document, &["team"]).filter(|t| !t.is_empty()),
            last_game: read_text(document, &["lastGame"]).filter(|t| !t.is_empty()),
        }
    }
}

/// Name containment or jersey number containment; a blank query matches all.
pub fn player_matches(player: &Player, query: &str) -> bool {
    let Some(needle) = prepare_query(query) else {
        return true;
    };
    contains_ignore_case(&player.name, &needle)
        || player.jersey_number.to_string().contains(&needle)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn read_text(document: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| document.get(*key))
        .find_map(|value| match value {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
