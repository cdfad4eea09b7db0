//! Definition and data message encoding
//!
//! A FIT file body is a stream of records. A *definition message*
//! declares the field layout (number, size, base type) for a local
//! message type; *data messages* carrying that local type must follow
//! a matching definition. This encoder emits three record kinds, each
//! under its own local type, with the field layouts held in
//! declarative tables so the protocol constants are auditable in one
//! place.

use crate::error::EncodeError;
use crate::models::{IntervalSpec, WorkoutSpec};
use crate::normalize;

// ============================================================================
// Protocol constants
// ============================================================================

// Base type bytes (FIT profile encoding)
const BASE_TYPE_ENUM: u8 = 0x00; // also used for uint8 fields
const BASE_TYPE_STRING: u8 = 0x07;
const BASE_TYPE_UINT16: u8 = 0x84;
const BASE_TYPE_UINT32: u8 = 0x86;

// Global message numbers
const GLOBAL_FILE_ID: u16 = 0;
const GLOBAL_WORKOUT: u16 = 26;
const GLOBAL_WORKOUT_STEP: u16 = 27;

// Local message types scoping definitions to data within this file
const LOCAL_FILE_ID: u8 = 0;
const LOCAL_WORKOUT: u8 = 1;
const LOCAL_WORKOUT_STEP: u8 = 2;

// Record header bits: definition messages set bit 6, data messages
// carry the bare local type
const DEFINITION_HEADER_BIT: u8 = 0x40;

// file_id field values
const FILE_TYPE_WORKOUT: u32 = 4;
const PRODUCT_UNKNOWN: u32 = 0xFFFF;
const SERIAL_UNKNOWN: u32 = 0xFFFF_FFFF;

// workout_step enum values; time-based duration and power targets are
// the only kinds this encoder produces
const DURATION_TYPE_TIME: u8 = 0;
const TARGET_TYPE_POWER: u8 = 1;

/// Fixed-string field width for workout and step names.
const NAME_FIELD_LEN: usize = 16;

/// The step counter in the workout message is a single byte.
pub const MAX_STEPS: usize = 255;

// ============================================================================
// Field tables
// ============================================================================

/// One field layout entry within a definition message.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub field_number: u8,
    pub size_bytes: u8,
    pub base_type: u8,
}

const fn field(field_number: u8, size_bytes: u8, base_type: u8) -> FieldDef {
    FieldDef {
        field_number,
        size_bytes,
        base_type,
    }
}

/// file_id: type, product, serial_number, time_created
const FILE_ID_FIELDS: [FieldDef; 4] = [
    field(3, 4, BASE_TYPE_UINT32),
    field(4, 4, BASE_TYPE_UINT32),
    field(5, 4, BASE_TYPE_UINT32),
    field(1, 4, BASE_TYPE_UINT32),
];

/// workout: wkt_name, num_valid_steps
const WORKOUT_FIELDS: [FieldDef; 2] = [
    field(8, NAME_FIELD_LEN as u8, BASE_TYPE_STRING),
    field(11, 1, BASE_TYPE_ENUM),
];

/// workout_step: message_index, wkt_step_name, duration_type,
/// duration_value, target_type, target_value
const WORKOUT_STEP_FIELDS: [FieldDef; 6] = [
    field(254, 2, BASE_TYPE_UINT16),
    field(0, NAME_FIELD_LEN as u8, BASE_TYPE_STRING),
    field(1, 1, BASE_TYPE_ENUM),
    field(2, 4, BASE_TYPE_UINT32),
    field(3, 1, BASE_TYPE_ENUM),
    field(4, 4, BASE_TYPE_UINT32),
];

// ============================================================================
// Record writers
// ============================================================================

/// Append a definition message for `local_type` declaring `fields`.
fn write_definition(buf: &mut Vec<u8>, local_type: u8, global: u16, fields: &[FieldDef]) {
    buf.push(DEFINITION_HEADER_BIT | local_type);
    buf.push(0x00); // reserved
    buf.push(0x00); // architecture: little-endian
    buf.extend_from_slice(&global.to_le_bytes());
    buf.push(fields.len() as u8);
    for f in fields {
        buf.extend_from_slice(&[f.field_number, f.size_bytes, f.base_type]);
    }
}

/// Append a name as a fixed 16-byte field: at most 15 UTF-8 bytes of
/// content (truncated on a char boundary), NUL-padded to 16.
fn write_name_field(buf: &mut Vec<u8>, name: &str) {
    let content = truncate_utf8(name, NAME_FIELD_LEN - 1);
    buf.extend_from_slice(content.as_bytes());
    buf.resize(buf.len() + NAME_FIELD_LEN - content.len(), 0x00);
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a
/// codepoint.
fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Message stream
// ============================================================================

/// Build the complete message stream for a workout.
///
/// Emits, in order: file_id definition + data, workout definition +
/// data, then one workout_step definition followed by a data message
/// per interval. `time_created` is the file creation time in seconds
/// since the FIT epoch.
pub fn build_messages(spec: &WorkoutSpec, time_created: u32) -> Result<Vec<u8>, EncodeError> {
    let fallback;
    let intervals: &[IntervalSpec] = if spec.intervals.is_empty() {
        fallback = [IntervalSpec::default_steady()];
        &fallback
    } else {
        &spec.intervals
    };
    if intervals.len() > MAX_STEPS {
        return Err(EncodeError::TooManySteps(intervals.len()));
    }

    let mut buf = Vec::new();

    // file_id (local type 0)
    write_definition(&mut buf, LOCAL_FILE_ID, GLOBAL_FILE_ID, &FILE_ID_FIELDS);
    buf.push(LOCAL_FILE_ID);
    buf.extend_from_slice(&FILE_TYPE_WORKOUT.to_le_bytes());
    buf.extend_from_slice(&PRODUCT_UNKNOWN.to_le_bytes());
    buf.extend_from_slice(&SERIAL_UNKNOWN.to_le_bytes());
    buf.extend_from_slice(&time_created.to_le_bytes());

    // workout (local type 1)
    write_definition(&mut buf, LOCAL_WORKOUT, GLOBAL_WORKOUT, &WORKOUT_FIELDS);
    buf.push(LOCAL_WORKOUT);
    write_name_field(&mut buf, &spec.name);
    buf.push(intervals.len() as u8);

    // workout_step (local type 2): one definition serves every step
    write_definition(
        &mut buf,
        LOCAL_WORKOUT_STEP,
        GLOBAL_WORKOUT_STEP,
        &WORKOUT_STEP_FIELDS,
    );
    for (index, interval) in intervals.iter().enumerate() {
        let duration_ms = normalize::duration_seconds(&interval.duration)?
            .saturating_mul(1000);
        let watts = normalize::target_power_watts(interval.target_power.as_ref(), spec.ftp_watts);

        buf.push(LOCAL_WORKOUT_STEP);
        buf.extend_from_slice(&(index as u16).to_le_bytes());
        write_name_field(&mut buf, &interval.step_name(index));
        buf.push(DURATION_TYPE_TIME);
        buf.extend_from_slice(&duration_ms.to_le_bytes());
        buf.push(TARGET_TYPE_POWER);
        buf.extend_from_slice(&watts.to_le_bytes());
    }

    Ok(buf)
}
