pub mod game;
pub mod messages;
pub mod user;
pub mod errors;

/// Identifier of a running game, carried in every cell button's custom id.
pub type GameId = uuid::Uuid;

/// Platform user identifier (a snowflake, kept as its string form).
pub type UserId = String;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use user::*;
pub use errors::*;
