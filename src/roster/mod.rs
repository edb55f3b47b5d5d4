pub mod models;

pub use models::{player_matches, NewPlayer, Player, PlayerForm};
