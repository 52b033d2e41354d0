//! Decoder and roster summary for arcdps EVTC combat logs.
//!
//! ```no_run
//! use logmon_core::{evtc, roster};
//!
//! # fn run(bytes: &[u8]) -> Result<(), evtc::DecodeError> {
//! let mut log = evtc::decode(bytes)?;
//! let tables = roster::RosterTables::default();
//! let report = roster::enrich_and_summarize(&mut log.agents, &log.events, &tables);
//! println!("squad members: {}", report.squad_count);
//! # Ok(())
//! # }
//! ```

pub mod evtc;
pub mod roster;
