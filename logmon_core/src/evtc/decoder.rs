//! Whole-buffer EVTC decoder.
//!
//! Layout: a 16-byte header, a u32-counted run of 96-byte agents, a
//! u32-counted run of 68-byte skills, then 64-byte events until the end of
//! the buffer.

use serde::Serialize;
use tracing::debug;

use super::cursor::Cursor;
use super::error::{DecodeError, Result};
use super::types::{
    party_from_name, Agent, Event, Header, Skill, EVENT_SIZE, EVTC_MAGIC, NAME_SIZE,
};

/// Everything a single EVTC buffer contains, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedLog {
    pub header: Header,
    pub agents: Vec<Agent>,
    pub skills: Vec<Skill>,
    pub events: Vec<Event>,
}

/// Decode a complete EVTC buffer.
pub fn decode(buffer: &[u8]) -> Result<DecodedLog> {
    let mut cursor = Cursor::new(buffer);

    let header = read_header(&mut cursor)?;

    let agent_count = cursor.read_u32()?;
    let agents = (0..agent_count)
        .map(|_| read_agent(&mut cursor))
        .collect::<Result<Vec<_>>>()?;

    let skill_count = cursor.read_u32()?;
    let skills = (0..skill_count)
        .map(|_| read_skill(&mut cursor))
        .collect::<Result<Vec<_>>>()?;

    let events = read_events(&mut cursor)?;

    debug!(
        version = %header.version,
        revision = header.revision,
        agents = agents.len(),
        skills = skills.len(),
        events = events.len(),
        "Decoded EVTC buffer",
    );

    Ok(DecodedLog {
        header,
        agents,
        skills,
        events,
    })
}

fn read_header(cursor: &mut Cursor<'_>) -> Result<Header> {
    // A non-EVTC prefix is InvalidMagic even when fewer than 4 bytes exist.
    let available = cursor.remaining().min(EVTC_MAGIC.len());
    let probe = cursor.clone().take(available)?;
    if !EVTC_MAGIC.starts_with(probe) {
        return Err(DecodeError::InvalidMagic {
            expected: EVTC_MAGIC.to_vec(),
            got: probe.to_vec(),
        });
    }

    let magic = read_text::<4>(cursor, "header magic")?;
    let version = read_text::<8>(cursor, "header version")?;
    let instruction_set_id = cursor.read_u8()?;
    let revision = cursor.read_u16()?;
    cursor.skip(1)?;

    Ok(Header {
        magic,
        version,
        instruction_set_id,
        revision,
    })
}

fn read_agent(cursor: &mut Cursor<'_>) -> Result<Agent> {
    let address = cursor.read_u64()?;
    let profession = cursor.read_u32()?;
    let elite = cursor.read_u32()?;
    let toughness = cursor.read_u16()?;
    let concentration = cursor.read_u16()?;
    let healing = cursor.read_u16()?;
    let hitbox_width = cursor.read_u16()?;
    let condition = cursor.read_u16()?;
    let hitbox_height = cursor.read_u16()?;
    let name = read_text::<NAME_SIZE>(cursor, "agent name")?;
    cursor.skip(4)?;

    Ok(Agent {
        address,
        profession,
        elite,
        toughness,
        concentration,
        healing,
        hitbox_width,
        condition,
        hitbox_height,
        party: party_from_name(&name),
        name,
        team: None,
        instance_id: 0,
    })
}

fn read_skill(cursor: &mut Cursor<'_>) -> Result<Skill> {
    let id = cursor.read_i32()?;
    let name = read_text::<NAME_SIZE>(cursor, "skill name")?;
    Ok(Skill { id, name })
}

fn read_events(cursor: &mut Cursor<'_>) -> Result<Vec<Event>> {
    let remainder = cursor.remaining() % EVENT_SIZE;
    if remainder != 0 {
        return Err(DecodeError::TruncatedRecord {
            offset: cursor.position() + cursor.remaining() - remainder,
            remaining: remainder,
        });
    }

    let mut events = Vec::with_capacity(cursor.remaining() / EVENT_SIZE);
    while !cursor.is_empty() {
        events.push(read_event(cursor)?);
    }
    Ok(events)
}

fn read_event(cursor: &mut Cursor<'_>) -> Result<Event> {
    Ok(Event {
        time: cursor.read_i64()?,
        src_agent: cursor.read_u64()?,
        dst_agent: cursor.read_u64()?,
        value: cursor.read_i32()?,
        buff_dmg: cursor.read_i32()?,
        overstack_value: cursor.read_u32()?,
        skill_id: cursor.read_u32()?,
        src_instid: cursor.read_u16()?,
        dst_instid: cursor.read_u16()?,
        src_master_instid: cursor.read_u16()?,
        dst_master_instid: cursor.read_u16()?,
        iff: cursor.read_u8()?,
        buff: cursor.read_u8()?,
        result: cursor.read_u8()?,
        is_activation: cursor.read_u8()?,
        is_buffremove: cursor.read_u8()?,
        is_ninety: cursor.read_u8()?,
        is_fifty: cursor.read_u8()?,
        is_moving: cursor.read_u8()?,
        is_statechange: cursor.read_u8()?,
        is_flanking: cursor.read_u8()?,
        is_shields: cursor.read_u8()?,
        is_offcycle: cursor.read_u8()?,
        pad: cursor.read_u32()?,
    })
}

/// Fixed-width text field: trailing NULs stripped, remainder must be UTF-8.
fn read_text<const N: usize>(cursor: &mut Cursor<'_>, field: &'static str) -> Result<String> {
    let offset = cursor.position();
    let raw = cursor.take(N)?;
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);

    std::str::from_utf8(&raw[..end])
        .map(str::to_owned)
        .map_err(|source| DecodeError::InvalidEncoding {
            field,
            offset,
            source,
        })
}
