//! Static lookup data used to label agents: team ids, professions, elite
//! specializations and display abbreviations.
//!
//! Tables are plain values handed to the enricher and summarizer by
//! reference. A JSON file can replace any of the four tables; tables it does
//! not mention keep the built-in data.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::evtc::TeamColor;

/// Label used when neither the elite nor the profession table knows an agent.
pub const UNKNOWN_PROFESSION: &str = "Unknown";

const TEAM_IDS: &[(u64, TeamColor)] = &[
    (705, TeamColor::Red),
    (706, TeamColor::Red),
    (882, TeamColor::Red),
    (2520, TeamColor::Red),
    (2739, TeamColor::Green),
    (2741, TeamColor::Green),
    (2752, TeamColor::Green),
    (2763, TeamColor::Green),
    (432, TeamColor::Blue),
    (1277, TeamColor::Blue),
];

const PROFESSIONS: &[(u32, &str)] = &[
    (1, "Guardian"),
    (2, "Warrior"),
    (3, "Engineer"),
    (4, "Ranger"),
    (5, "Thief"),
    (6, "Elementalist"),
    (7, "Mesmer"),
    (8, "Necromancer"),
    (9, "Revenant"),
];

const ELITES: &[(u32, &str)] = &[
    (5, "Druid"),
    (7, "Daredevil"),
    (18, "Berserker"),
    (27, "Dragonhunter"),
    (34, "Reaper"),
    (40, "Chronomancer"),
    (43, "Scrapper"),
    (48, "Tempest"),
    (52, "Herald"),
    (55, "Soulbeast"),
    (56, "Weaver"),
    (57, "Holosmith"),
    (58, "Deadeye"),
    (59, "Mirage"),
    (60, "Scourge"),
    (61, "Spellbreaker"),
    (62, "Firebrand"),
    (63, "Renegade"),
    (64, "Harbinger"),
    (65, "Willbender"),
    (66, "Virtuoso"),
    (67, "Catalyst"),
    (68, "Bladesworn"),
    (69, "Vindicator"),
    (70, "Mechanist"),
    (71, "Specter"),
    (72, "Untamed"),
];

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Guardian", "Gn"),
    ("Dragonhunter", "Dh"),
    ("Firebrand", "Fb"),
    ("Willbender", "Wb"),
    ("Warrior", "War"),
    ("Berserker", "Brs"),
    ("Spellbreaker", "Spb"),
    ("Bladesworn", "Bds"),
    ("Engineer", "Eng"),
    ("Scrapper", "Scr"),
    ("Holosmith", "Hol"),
    ("Mechanist", "Mec"),
    ("Ranger", "Rgr"),
    ("Druid", "Dru"),
    ("Soulbeast", "Slb"),
    ("Untamed", "Unt"),
    ("Thief", "Thf"),
    ("Daredevil", "Dar"),
    ("Deadeye", "Ded"),
    ("Specter", "Spe"),
    ("Elementalist", "Ele"),
    ("Tempest", "Tmp"),
    ("Weaver", "Wea"),
    ("Catalyst", "Cat"),
    ("Mesmer", "Mes"),
    ("Chronomancer", "Chr"),
    ("Mirage", "Mir"),
    ("Virtuoso", "Vir"),
    ("Necromancer", "Nec"),
    ("Reaper", "Rea"),
    ("Scourge", "Scg"),
    ("Harbinger", "Har"),
    ("Revenant", "Rev"),
    ("Herald", "Her"),
    ("Renegade", "Ren"),
    ("Vindicator", "Vin"),
];

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("tables parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTables {
    pub teams: HashMap<u64, TeamColor>,
    pub professions: HashMap<u32, String>,
    pub elites: HashMap<u32, String>,
    pub abbreviations: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TablesOverride {
    #[serde(default)]
    teams: Option<HashMap<u64, TeamColor>>,
    #[serde(default)]
    professions: Option<HashMap<u32, String>>,
    #[serde(default)]
    elites: Option<HashMap<u32, String>>,
    #[serde(default)]
    abbreviations: Option<HashMap<String, String>>,
}

impl Default for RosterTables {
    fn default() -> Self {
        Self {
            teams: TEAM_IDS.iter().copied().collect(),
            professions: owned(PROFESSIONS),
            elites: owned(ELITES),
            abbreviations: ABBREVIATIONS
                .iter()
                .map(|(name, abbrv)| (name.to_string(), abbrv.to_string()))
                .collect(),
        }
    }
}

fn owned(entries: &[(u32, &str)]) -> HashMap<u32, String> {
    entries
        .iter()
        .map(|(id, name)| (*id, name.to_string()))
        .collect()
}

impl RosterTables {
    pub fn from_json_str(json: &str) -> Result<Self, TablesError> {
        let overrides: TablesOverride = serde_json::from_str(json)?;
        let mut tables = Self::default();

        if let Some(teams) = overrides.teams {
            tables.teams = teams;
        }
        if let Some(professions) = overrides.professions {
            tables.professions = professions;
        }
        if let Some(elites) = overrides.elites {
            tables.elites = elites;
        }
        if let Some(abbreviations) = overrides.abbreviations {
            tables.abbreviations = abbreviations;
        }

        Ok(tables)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, TablesError> {
        let json = fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn team_color(&self, team_id: u64) -> Option<TeamColor> {
        self.teams.get(&team_id).copied()
    }

    /// Elite specialization name when known, else the base profession name.
    pub fn profession_label(&self, profession: u32, elite: u32) -> &str {
        self.elites
            .get(&elite)
            .or_else(|| self.professions.get(&profession))
            .map_or(UNKNOWN_PROFESSION, String::as_str)
    }

    pub fn abbreviation<'a>(&'a self, label: &'a str) -> &'a str {
        self.abbreviations
            .get(label)
            .map_or(label, String::as_str)
    }
}
