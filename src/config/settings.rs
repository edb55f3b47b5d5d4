use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "stat_slam.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerSettings {
    /// `None` allows any origin.
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSettings {
    pub stats: String,
    pub players: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            stats: "masterStats".to_string(),
            players: "players".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub collections: CollectionSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            server: ServerSettings::default(),
            collections: CollectionSettings::default(),
        }
    }

    /// Defaults overridden by `DATABASE_PATH` and `ALLOWED_ORIGIN`.
    pub fn from_env() -> Self {
        Self::new().with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = non_empty(lookup("DATABASE_PATH")) {
            self.database.path = path;
        }
        if let Some(origin) = non_empty(lookup("ALLOWED_ORIGIN")) {
            self.server.allowed_origin = Some(origin);
        }
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
