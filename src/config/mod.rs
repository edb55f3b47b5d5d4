pub mod settings;

pub use settings::{AppConfig, CollectionSettings, DatabaseSettings, ServerSettings};
