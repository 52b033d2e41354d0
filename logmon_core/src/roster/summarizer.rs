use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use super::enricher::enrich;
use super::tables::RosterTables;
use crate::evtc::{Agent, Event, TeamColor};

/// Team and squad composition for one fight.
///
/// Counts are accumulated in unordered maps; use the `sorted_*` accessors for
/// presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterReport {
    pub squad_count: usize,
    pub team_professions: HashMap<TeamColor, HashMap<String, usize>>,
    pub squad_professions: HashMap<String, usize>,
    pub squad_color: Option<TeamColor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessionCount {
    pub profession: String,
    pub count: usize,
}

impl RosterReport {
    /// Teams with at least one non-squad player, ordered by color name.
    pub fn teams(&self) -> Vec<TeamColor> {
        let mut teams: Vec<TeamColor> = self.team_professions.keys().copied().collect();
        teams.sort_by_key(|team| team.as_str());
        teams
    }

    pub fn team_total(&self, team: TeamColor) -> usize {
        self.team_professions
            .get(&team)
            .map_or(0, |counts| counts.values().sum())
    }

    pub fn sorted_team(&self, team: TeamColor) -> Vec<ProfessionCount> {
        self.team_professions
            .get(&team)
            .map(sorted_counts)
            .unwrap_or_default()
    }

    pub fn sorted_squad(&self) -> Vec<ProfessionCount> {
        sorted_counts(&self.squad_professions)
    }

    pub fn is_allied(&self, team: TeamColor) -> bool {
        self.squad_color == Some(team)
    }
}

/// Count descending, ties by profession name ascending.
fn sorted_counts(counts: &HashMap<String, usize>) -> Vec<ProfessionCount> {
    let mut sorted: Vec<ProfessionCount> = counts
        .iter()
        .map(|(profession, count)| ProfessionCount {
            profession: profession.clone(),
            count: *count,
        })
        .collect();
    sorted.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.profession.cmp(&b.profession))
    });
    sorted
}

/// Summarize enriched agents. Agents without a player-style elite, an
/// instance id or a team are left out entirely.
pub fn summarize(agents: &[Agent], tables: &RosterTables) -> RosterReport {
    let mut report = RosterReport::default();
    let mut squad_ids: HashSet<u16> = HashSet::new();
    let mut seen_ids: HashSet<u16> = HashSet::new();

    for agent in agents {
        let team = match agent.team {
            Some(team) if agent.is_player_style() && agent.instance_id != 0 => team,
            _ => continue,
        };
        let label = tables.profession_label(agent.profession, agent.elite);

        if agent.is_squad_member() {
            if squad_ids.insert(agent.instance_id) {
                report.squad_count += 1;
                *report
                    .squad_professions
                    .entry(label.to_string())
                    .or_insert(0) += 1;
            }
            if report.squad_color.is_none() {
                report.squad_color = Some(team);
            }
        } else if seen_ids.insert(agent.instance_id) {
            *report
                .team_professions
                .entry(team)
                .or_default()
                .entry(label.to_string())
                .or_insert(0) += 1;
        }
    }

    debug!(
        squad_count = report.squad_count,
        teams = report.team_professions.len(),
        squad_color = ?report.squad_color,
        "Summarized roster",
    );

    report
}

/// Run both enrichment passes over `agents`, then summarize them.
pub fn enrich_and_summarize(
    agents: &mut [Agent],
    events: &[Event],
    tables: &RosterTables,
) -> RosterReport {
    enrich(agents, events, tables);
    summarize(agents, tables)
}
