//! Fills in the derived agent fields (team color, instance id) from events.
//!
//! Both passes only ever write a field that is still unset, so running the
//! enricher again over the same agents changes nothing.

use std::collections::HashMap;

use tracing::debug;

use super::tables::RosterTables;
use crate::evtc::{Agent, Event, StateChange};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub teams_assigned: usize,
    pub instance_ids_assigned: usize,
}

/// Latest team-change target per source address (last event wins).
pub fn collect_team_changes(events: &[Event]) -> HashMap<u64, u64> {
    let mut team_changes = HashMap::new();

    for event in events {
        if !event.is(StateChange::TeamChange) || event.src_agent == 0 {
            continue;
        }

        // Negative values never match a team id, but still count as a change.
        let assigned = if event.dst_agent != 0 {
            event.dst_agent
        } else {
            i64::from(event.value) as u64
        };
        if assigned != 0 {
            team_changes.insert(event.src_agent, assigned);
        }
    }

    team_changes
}

/// First non-zero `src_instid` per source address among plain combat events.
pub fn collect_instance_ids(events: &[Event]) -> HashMap<u64, u16> {
    let mut instance_ids = HashMap::new();

    for event in events {
        if event.is(StateChange::None) && event.src_instid != 0 && event.src_agent != 0 {
            instance_ids
                .entry(event.src_agent)
                .or_insert(event.src_instid);
        }
    }

    instance_ids
}

pub fn assign_teams(agents: &mut [Agent], events: &[Event], tables: &RosterTables) -> usize {
    let team_changes = collect_team_changes(events);
    let mut assigned = 0;

    for agent in agents
        .iter_mut()
        .filter(|agent| agent.is_player_style() && agent.team.is_none())
    {
        let color = team_changes
            .get(&agent.address)
            .and_then(|team_id| tables.team_color(*team_id));
        if let Some(color) = color {
            agent.team = Some(color);
            assigned += 1;
        }
    }

    assigned
}

pub fn assign_instance_ids(agents: &mut [Agent], events: &[Event]) -> usize {
    let instance_ids = collect_instance_ids(events);
    let mut assigned = 0;

    for agent in agents
        .iter_mut()
        .filter(|agent| agent.is_player_style() && agent.instance_id == 0)
    {
        if let Some(instid) = instance_ids.get(&agent.address) {
            agent.instance_id = *instid;
            assigned += 1;
        }
    }

    assigned
}

pub fn enrich(agents: &mut [Agent], events: &[Event], tables: &RosterTables) -> EnrichStats {
    let stats = EnrichStats {
        teams_assigned: assign_teams(agents, events, tables),
        instance_ids_assigned: assign_instance_ids(agents, events),
    };

    debug!(
        agents = agents.len(),
        events = events.len(),
        teams_assigned = stats.teams_assigned,
        instance_ids_assigned = stats.instance_ids_assigned,
        "Enriched roster",
    );

    stats
}
