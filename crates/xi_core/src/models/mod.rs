pub mod player;
pub mod record;
pub mod roster;

pub use player::{Player, PlayerId, PlayingStatus, Role, SquadEntry};
pub use record::MatchRecord;
pub use roster::{Designation, Pick, Roster};
