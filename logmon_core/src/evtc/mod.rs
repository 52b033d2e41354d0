// arcdps EVTC log reader: fixed-layout, little-endian records decoded from a
// fully materialized buffer.

pub mod cursor;
pub mod decoder;
pub mod error;
pub mod file;
pub mod types;

// Re-export main types
pub use cursor::Cursor;
pub use decoder::{decode, DecodedLog};
pub use error::{DecodeError, LoadError, Result};
pub use file::read_log_file;
pub use types::{
    Agent, Event, Header, Skill, StateChange, TeamColor, AGENT_SIZE, EVENT_SIZE, EVTC_MAGIC,
    HEADER_SIZE, NAME_SIZE, NON_PLAYER_ELITE, SKILL_SIZE, SQUAD_NAME_SEPARATOR,
};
