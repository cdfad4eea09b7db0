//! File assembly
//!
//! Wraps the message stream in the 14-byte FIT header and the trailing
//! CRC. The header embeds its own CRC over bytes 0-11; the trailing
//! CRC covers header + message stream. Assembly either yields a
//! complete, checksummed file or a single error — a malformed binary
//! container has no useful partial output.

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::checksum::crc16;
use crate::error::EncodeError;
use crate::messages::build_messages;
use crate::models::WorkoutSpec;

/// Header length in bytes; also the value of header byte 0.
pub const HEADER_LEN: usize = 14;
/// Trailing CRC length in bytes.
pub const TRAILER_LEN: usize = 2;

const PROTOCOL_VERSION: u8 = 0x20; // 2.0
const PROFILE_VERSION: u16 = 2132;
const FILE_MAGIC: &[u8; 4] = b".FIT";

/// Conventional extension for encoded files.
pub const FIT_EXTENSION: &str = ".fit";
const DEFAULT_FILENAME: &str = "workout.fit";

/// Encode a workout into a complete FIT file, stamped with the current
/// wall-clock time.
pub fn encode(spec: &WorkoutSpec) -> Result<Vec<u8>, EncodeError> {
    encode_at(spec, Utc::now())
}

/// Encode a workout with an explicit creation time.
///
/// The creation time is the only non-deterministic input to the
/// encoder; injecting it makes output byte-reproducible.
pub fn encode_at(spec: &WorkoutSpec, created: DateTime<Utc>) -> Result<Vec<u8>, EncodeError> {
    let messages = build_messages(spec, fit_timestamp(created))?;

    let mut file = Vec::with_capacity(HEADER_LEN + messages.len() + TRAILER_LEN);
    file.push(HEADER_LEN as u8);
    file.push(PROTOCOL_VERSION);
    file.extend_from_slice(&PROFILE_VERSION.to_le_bytes());
    file.extend_from_slice(&(messages.len() as u32).to_le_bytes());
    file.extend_from_slice(FILE_MAGIC);
    let header_crc = crc16(&file[..HEADER_LEN - 2]);
    file.extend_from_slice(&header_crc.to_le_bytes());

    file.extend_from_slice(&messages);
    let file_crc = crc16(&file);
    file.extend_from_slice(&file_crc.to_le_bytes());

    debug!(
        size = file.len(),
        steps = spec.intervals.len().max(1),
        name = %spec.name,
        "encoded workout file"
    );
    Ok(file)
}

/// Seconds since the FIT epoch (1989-12-31T00:00:00Z). Times before
/// the epoch clamp to 0.
fn fit_timestamp(at: DateTime<Utc>) -> u32 {
    let epoch = Utc.with_ymd_and_hms(1989, 12, 31, 0, 0, 0).unwrap();
    (at - epoch).num_seconds().max(0) as u32
}

/// Resolve the download filename for an encoded file: the requested
/// name with the `.fit` extension appended when absent, or the default
/// when none was requested.
pub fn resolve_filename(requested: Option<&str>) -> String {
    match requested {
        Some(name) if name.is_empty() => DEFAULT_FILENAME.to_string(),
        Some(name) if name.ends_with(FIT_EXTENSION) => name.to_string(),
        Some(name) => format!("{name}{FIT_EXTENSION}"),
        None => DEFAULT_FILENAME.to_string(),
    }
}
