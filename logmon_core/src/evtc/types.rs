// Record types for the arcdps EVTC binary format.
//
// All multi-byte fields are little-endian. Sizes below are on-disk sizes;
// the in-memory structs carry decoded, owned values.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const EVTC_MAGIC: [u8; 4] = *b"EVTC";

pub const HEADER_SIZE: usize = 16;
pub const AGENT_SIZE: usize = 96;
pub const SKILL_SIZE: usize = 68;
pub const EVENT_SIZE: usize = 64;
pub const NAME_SIZE: usize = 64;

/// Elite value marking an agent that is not a player-style combatant
/// (NPCs, gadgets).
pub const NON_PLAYER_ELITE: u32 = u32::MAX;

/// Separator packing `name\0account\0subgroup` into a squad member's name.
pub const SQUAD_NAME_SEPARATOR: char = '\0';

/// EVTC header - 16 bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub magic: String,           // "EVTC"
    pub version: String,         // build date, e.g. "20240612"
    pub instruction_set_id: u8,
    pub revision: u16,
    // 1 pad byte
}

/// Agent record - 96 bytes
///
/// The six 16-bit attribute fields are kept in on-disk order and treated as
/// opaque positional values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub address: u64,
    pub profession: u32,
    pub elite: u32,
    pub toughness: u16,
    pub concentration: u16,
    pub healing: u16,
    pub hitbox_width: u16,
    pub condition: u16,
    pub hitbox_height: u16,
    pub name: String,            // 64 bytes, trailing NULs stripped
    // 4 pad bytes

    /// Last character of the name when it contains a '.'.
    pub party: Option<char>,
    /// Filled in by the team pass of the enricher.
    pub team: Option<TeamColor>,
    /// Filled in by the instance id pass of the enricher; 0 = unset.
    pub instance_id: u16,
}

impl Agent {
    pub fn is_player_style(&self) -> bool {
        self.elite != NON_PLAYER_ELITE
    }

    pub fn is_squad_member(&self) -> bool {
        self.name.contains(SQUAD_NAME_SEPARATOR)
    }
}

pub(crate) fn party_from_name(name: &str) -> Option<char> {
    if name.contains('.') {
        name.chars().last()
    } else {
        None
    }
}

/// Skill record - 68 bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub id: i32,
    pub name: String,            // 64 bytes, trailing NULs stripped
}

/// Combat event record - 64 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Event {
    pub time: i64,
    pub src_agent: u64,          // 0 = no agent
    pub dst_agent: u64,          // 0 = no agent
    pub value: i32,
    pub buff_dmg: i32,
    pub overstack_value: u32,
    pub skill_id: u32,
    pub src_instid: u16,
    pub dst_instid: u16,
    pub src_master_instid: u16,
    pub dst_master_instid: u16,
    pub iff: u8,
    pub buff: u8,
    pub result: u8,
    pub is_activation: u8,
    pub is_buffremove: u8,
    pub is_ninety: u8,
    pub is_fifty: u8,
    pub is_moving: u8,
    pub is_statechange: u8,      // see StateChange
    pub is_flanking: u8,
    pub is_shields: u8,
    pub is_offcycle: u8,
    pub pad: u32,
}

impl Event {
    pub fn state_change(&self) -> Option<StateChange> {
        StateChange::from_raw(self.is_statechange)
    }

    pub fn is(&self, kind: StateChange) -> bool {
        self.is_statechange == kind as u8
    }
}

/// arcdps `cbtstatechange`, selected by `Event::is_statechange`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StateChange {
    None = 0,
    EnterCombat = 1,
    ExitCombat = 2,
    ChangeUp = 3,
    ChangeDead = 4,
    ChangeDown = 5,
    Spawn = 6,
    Despawn = 7,
    HealthPctUpdate = 8,
    SqCombatStart = 9,
    SqCombatEnd = 10,
    WeapSwap = 11,
    MaxHealthUpdate = 12,
    PointOfView = 13,
    Language = 14,
    GwBuild = 15,
    ShardId = 16,
    Reward = 17,
    BuffInitial = 18,
    Position = 19,
    Velocity = 20,
    Facing = 21,
    TeamChange = 22,
    AttackTarget = 23,
    Targetable = 24,
    MapId = 25,
    ReplInfo = 26,
    StackActive = 27,
    StackReset = 28,
    Guild = 29,
    BuffInfo = 30,
    BuffFormula = 31,
    SkillInfo = 32,
    SkillTiming = 33,
    BreakbarState = 34,
    BreakbarPercent = 35,
    Integrity = 36,
    Marker = 37,
    BarrierPctUpdate = 38,
    StatReset = 39,
    Extension = 40,
    ApiDelayed = 41,
    InstanceStart = 42,
    RateHealth = 43,
    Last90BeforeDown = 44,
    Effect = 45,
    IdToGuid = 46,
    LogNpcUpdate = 47,
    IdleEvent = 48,
    ExtensionCombat = 49,
    FractalScale = 50,
    Effect2Defunc = 51,
    Ruleset = 52,
    SquadMarker = 53,
    ArcBuild = 54,
    Glider = 55,
    StunBreak = 56,
    MissileCreate = 57,
    MissileLaunch = 58,
    MissileRemove = 59,
    EffectGroundCreate = 60,
    EffectGroundRemove = 61,
    EffectAgentCreate = 62,
    EffectAgentRemove = 63,
    IidChange = 64,
}

impl StateChange {
    const ALL: [StateChange; 65] = [
        StateChange::None,
        StateChange::EnterCombat,
        StateChange::ExitCombat,
        StateChange::ChangeUp,
        StateChange::ChangeDead,
        StateChange::ChangeDown,
        StateChange::Spawn,
        StateChange::Despawn,
        StateChange::HealthPctUpdate,
        StateChange::SqCombatStart,
        StateChange::SqCombatEnd,
        StateChange::WeapSwap,
        StateChange::MaxHealthUpdate,
        StateChange::PointOfView,
        StateChange::Language,
        StateChange::GwBuild,
        StateChange::ShardId,
        StateChange::Reward,
        StateChange::BuffInitial,
        StateChange::Position,
        StateChange::Velocity,
        StateChange::Facing,
        StateChange::TeamChange,
        StateChange::AttackTarget,
        StateChange::Targetable,
        StateChange::MapId,
        StateChange::ReplInfo,
        StateChange::StackActive,
        StateChange::StackReset,
        StateChange::Guild,
        StateChange::BuffInfo,
        StateChange::BuffFormula,
        StateChange::SkillInfo,
        StateChange::SkillTiming,
        StateChange::BreakbarState,
        StateChange::BreakbarPercent,
        StateChange::Integrity,
        StateChange::Marker,
        StateChange::BarrierPctUpdate,
        StateChange::StatReset,
        StateChange::Extension,
        StateChange::ApiDelayed,
        StateChange::InstanceStart,
        StateChange::RateHealth,
        StateChange::Last90BeforeDown,
        StateChange::Effect,
        StateChange::IdToGuid,
        StateChange::LogNpcUpdate,
        StateChange::IdleEvent,
        StateChange::ExtensionCombat,
        StateChange::FractalScale,
        StateChange::Effect2Defunc,
        StateChange::Ruleset,
        StateChange::SquadMarker,
        StateChange::ArcBuild,
        StateChange::Glider,
        StateChange::StunBreak,
        StateChange::MissileCreate,
        StateChange::MissileLaunch,
        StateChange::MissileRemove,
        StateChange::EffectGroundCreate,
        StateChange::EffectGroundRemove,
        StateChange::EffectAgentCreate,
        StateChange::EffectAgentRemove,
        StateChange::IidChange,
    ];

    /// Map a raw `is_statechange` byte; values newer than this table yield `None`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }
}

/// Team affiliation resolved from a team-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamColor {
    Red,
    Green,
    Blue,
}

impl TeamColor {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamColor::Red => "Red",
            TeamColor::Green => "Green",
            TeamColor::Blue => "Blue",
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
