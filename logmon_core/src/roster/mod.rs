// Roster pipeline: enrich decoded agents from their events, then summarize
// team and squad composition.

pub mod enricher;
pub mod summarizer;
pub mod tables;

pub use enricher::{assign_instance_ids, assign_teams, enrich, EnrichStats};
pub use summarizer::{enrich_and_summarize, summarize, ProfessionCount, RosterReport};
pub use tables::{RosterTables, TablesError, UNKNOWN_PROFESSION};
