pub mod roster;
pub mod server;
pub mod stats;

pub use roster::{ListedPlayer, RosterService};
pub use server::ServerService;
pub use stats::{ListedRow, StatsService};
