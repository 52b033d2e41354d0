// Shared fixture builder: assembles EVTC buffers byte by byte in the on-disk
// layout so the decoder is exercised against exactly what arcdps writes.

#![allow(dead_code)]

use logmon_core::evtc::{StateChange, AGENT_SIZE, EVENT_SIZE, NAME_SIZE, SKILL_SIZE};

#[derive(Debug, Clone)]
pub struct AgentFixture {
    pub address: u64,
    pub profession: u32,
    pub elite: u32,
    pub attributes: [u16; 6],
    pub name: Vec<u8>,
}

impl AgentFixture {
    pub fn new(address: u64, profession: u32, elite: u32, name: &[u8]) -> Self {
        Self {
            address,
            profession,
            elite,
            attributes: [0; 6],
            name: name.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EventFixture {
    pub time: i64,
    pub src_agent: u64,
    pub dst_agent: u64,
    pub value: i32,
    pub src_instid: u16,
    pub is_statechange: u8,
}

impl EventFixture {
    pub fn combat(time: i64, src_agent: u64, src_instid: u16) -> Self {
        Self {
            time,
            src_agent,
            src_instid,
            ..Self::default()
        }
    }

    pub fn team_change(time: i64, src_agent: u64, team_id: u64) -> Self {
        Self {
            time,
            src_agent,
            dst_agent: team_id,
            is_statechange: StateChange::TeamChange as u8,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogBuilder {
    magic: [u8; 4],
    version: [u8; 8],
    revision: u16,
    agents: Vec<AgentFixture>,
    skills: Vec<(i32, Vec<u8>)>,
    events: Vec<EventFixture>,
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self {
            magic: *b"EVTC",
            version: *b"20240612",
            revision: 1,
            agents: Vec::new(),
            skills: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    pub fn agent(mut self, agent: AgentFixture) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn skill(mut self, id: i32, name: &[u8]) -> Self {
        self.skills.push((id, name.to_vec()));
        self
    }

    pub fn event(mut self, event: EventFixture) -> Self {
        self.events.push(event);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::new();

        data.extend_from_slice(&self.magic);
        data.extend_from_slice(&self.version);
        data.push(0);
        data.extend_from_slice(&self.revision.to_le_bytes());
        data.push(0);

        data.extend_from_slice(&(self.agents.len() as u32).to_le_bytes());
        for agent in &self.agents {
            let start = data.len();
            data.extend_from_slice(&agent.address.to_le_bytes());
            data.extend_from_slice(&agent.profession.to_le_bytes());
            data.extend_from_slice(&agent.elite.to_le_bytes());
            for value in agent.attributes {
                data.extend_from_slice(&value.to_le_bytes());
            }
            data.extend_from_slice(&name_block(&agent.name));
            data.extend_from_slice(&[0u8; 4]);
            assert_eq!(data.len() - start, AGENT_SIZE);
        }

        data.extend_from_slice(&(self.skills.len() as u32).to_le_bytes());
        for (id, name) in &self.skills {
            let start = data.len();
            data.extend_from_slice(&id.to_le_bytes());
            data.extend_from_slice(&name_block(name));
            assert_eq!(data.len() - start, SKILL_SIZE);
        }

        for event in &self.events {
            let start = data.len();
            data.extend_from_slice(&event.time.to_le_bytes());
            data.extend_from_slice(&event.src_agent.to_le_bytes());
            data.extend_from_slice(&event.dst_agent.to_le_bytes());
            data.extend_from_slice(&event.value.to_le_bytes());
            data.extend_from_slice(&0i32.to_le_bytes()); // buff_dmg
            data.extend_from_slice(&0u32.to_le_bytes()); // overstack_value
            data.extend_from_slice(&0u32.to_le_bytes()); // skill_id
            data.extend_from_slice(&event.src_instid.to_le_bytes());
            data.extend_from_slice(&[0u8; 6]); // dst, src master, dst master instid
            let mut flags = [0u8; 12];
            flags[8] = event.is_statechange;
            data.extend_from_slice(&flags);
            data.extend_from_slice(&0u32.to_le_bytes());
            assert_eq!(data.len() - start, EVENT_SIZE);
        }

        data
    }
}

pub fn name_block(name: &[u8]) -> [u8; NAME_SIZE] {
    let mut block = [0u8; NAME_SIZE];
    block[..name.len()].copy_from_slice(name);
    block
}
