//! Output formatters for fight summaries
//!
//! Supports text and JSON output formats.

use serde::Serialize;

use logmon_core::evtc::TeamColor;
use logmon_core::roster::{ProfessionCount, RosterReport, RosterTables};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format '{}'. Use 'text' or 'json'", s)),
        }
    }
}

/// One processed log: record counts plus its roster report.
#[derive(Debug, Clone)]
pub struct FightSummary {
    pub file_name: String,
    pub version: String,
    pub agent_count: usize,
    pub skill_count: usize,
    pub event_count: usize,
    pub report: RosterReport,
}

pub fn format_summary(summary: &FightSummary, tables: &RosterTables, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_summary_text(summary, tables),
        OutputFormat::Json => format_summary_json(summary),
    }
}

fn format_summary_text(summary: &FightSummary, tables: &RosterTables) -> String {
    let report = &summary.report;
    let mut output = String::new();

    output.push_str("===== Log Summary =====\n");
    output.push_str(&format!("File: {}\n", summary.file_name));
    output.push_str(&format!("Squad members: {}\n", report.squad_count));
    output.push_str("Squad composition:\n");
    output.push_str(&format!(
        "  {}\n",
        composition_line(&report.sorted_squad(), tables)
    ));

    let teams = report.teams();
    if teams.is_empty() {
        output.push_str("No non-squad players found.\n");
    }
    for team in teams {
        let team_name = team_label(report, team);
        output.push_str(&format!(
            "\n{} ({} players):\n",
            team_name,
            report.team_total(team)
        ));
        output.push_str(&format!(
            "  {} Comp: {}\n",
            team_name,
            composition_line(&report.sorted_team(team), tables)
        ));
    }
    output.push_str("========================\n");

    output
}

fn team_label(report: &RosterReport, team: TeamColor) -> String {
    if report.is_allied(team) {
        "Allies".to_string()
    } else {
        format!("Team {}", team)
    }
}

fn composition_line(counts: &[ProfessionCount], tables: &RosterTables) -> String {
    counts
        .iter()
        .map(|entry| format!("{}: {}", tables.abbreviation(&entry.profession), entry.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_summary_json(summary: &FightSummary) -> String {
    #[derive(Serialize)]
    struct JsonTeam {
        team: TeamColor,
        allied: bool,
        total: usize,
        professions: Vec<ProfessionCount>,
    }

    #[derive(Serialize)]
    struct JsonSummary<'a> {
        file: &'a str,
        version: &'a str,
        agents: usize,
        skills: usize,
        events: usize,
        squad_count: usize,
        squad_color: Option<TeamColor>,
        squad: Vec<ProfessionCount>,
        teams: Vec<JsonTeam>,
    }

    let report = &summary.report;
    let json = JsonSummary {
        file: &summary.file_name,
        version: &summary.version,
        agents: summary.agent_count,
        skills: summary.skill_count,
        events: summary.event_count,
        squad_count: report.squad_count,
        squad_color: report.squad_color,
        squad: report.sorted_squad(),
        teams: report
            .teams()
            .into_iter()
            .map(|team| JsonTeam {
                team,
                allied: report.is_allied(team),
                total: report.team_total(team),
                professions: report.sorted_team(team),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::collections::HashMap;

    fn sample_summary() -> FightSummary {
        let mut team_professions = HashMap::new();
        team_professions.insert(
            TeamColor::Red,
            HashMap::from([("Scourge".to_string(), 3), ("Firebrand".to_string(), 3)]),
        );
        team_professions.insert(
            TeamColor::Green,
            HashMap::from([("Warrior".to_string(), 1)]),
        );

        FightSummary {
            file_name: "20241019-201500.evtc".to_string(),
            version: "20240612".to_string(),
            agent_count: 12,
            skill_count: 40,
            event_count: 900,
            report: RosterReport {
                squad_count: 2,
                team_professions,
                squad_professions: HashMap::from([("Herald".to_string(), 2)]),
                squad_color: Some(TeamColor::Green),
            },
        }
    }

    #[test]
    fn output_format__from_str__then_case_insensitive() {
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("Json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().unwrap_err().contains("yaml"));
    }

    #[test]
    fn format_text__squad_team__then_labelled_allies() {
        let text = format_summary(&sample_summary(), &RosterTables::default(), OutputFormat::Text);

        assert!(text.contains("File: 20241019-201500.evtc"));
        assert!(text.contains("Squad members: 2"));
        assert!(text.contains("  Her: 2"));
        assert!(text.contains("Allies (1 players):"));
        assert!(text.contains("Team Red (6 players):"));
        assert!(!text.contains("No non-squad players found."));
    }

    #[test]
    fn format_text__ties__then_name_order_after_count() {
        let text = format_summary(&sample_summary(), &RosterTables::default(), OutputFormat::Text);
        assert!(text.contains("Team Red Comp: Fb: 3, Scg: 3"));
    }

    #[test]
    fn format_text__teams__then_sorted_by_color_name() {
        let text = format_summary(&sample_summary(), &RosterTables::default(), OutputFormat::Text);
        let allies = text.find("Allies").unwrap();
        let red = text.find("Team Red").unwrap();
        assert!(allies < red);
    }

    #[test]
    fn format_text__no_enemies__then_notice_printed() {
        let mut summary = sample_summary();
        summary.report.team_professions.clear();

        let text = format_summary(&summary, &RosterTables::default(), OutputFormat::Text);
        assert!(text.contains("No non-squad players found."));
    }

    #[test]
    fn format_json__summary__then_structured_and_sorted() {
        let json = format_summary(&sample_summary(), &RosterTables::default(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["file"], "20241019-201500.evtc");
        assert_eq!(value["events"], 900);
        assert_eq!(value["squad_count"], 2);
        assert_eq!(value["squad_color"], "Green");
        assert_eq!(value["teams"][0]["team"], "Green");
        assert_eq!(value["teams"][0]["allied"], true);
        assert_eq!(value["teams"][1]["total"], 6);
        assert_eq!(value["teams"][1]["professions"][0]["profession"], "Firebrand");
        assert_eq!(value["teams"][1]["professions"][1]["profession"], "Scourge");
    }
}
