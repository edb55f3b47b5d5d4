pub mod derive;
pub mod filter;
pub mod input;
pub mod normalize;
pub mod projection;
pub mod types;

pub use derive::validate_and_derive;
pub use filter::{filter_rows, matches};
pub use input::{coerce_count, StatForm};
pub use normalize::{normalize, MalformedField, NormalizedRecord, StoredStatRecord};
pub use projection::{format_percentage, project, project_document, StatRow};
pub use types::{PlayerStatRecord, RawStatLine, ShotCategory, ShotLine};
