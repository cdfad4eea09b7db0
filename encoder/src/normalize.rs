//! Duration and power normalization
//!
//! Canonicalizes the flexible interval inputs into integer seconds and
//! watts before encoding. Duration parsing is strict (an interval with
//! an unreadable duration aborts the whole file), while malformed
//! percentage text deliberately degrades to the default target: one
//! bad power annotation should not block an otherwise valid workout.

use tracing::warn;

use crate::error::EncodeError;
use crate::models::{DurationInput, PercentValue, PowerInput};

/// Default power target when an interval carries no usable power
/// information, as a percentage of FTP.
pub const DEFAULT_POWER_PCT: f64 = 70.0;

/// Canonicalize a duration input to whole seconds.
///
/// Numeric input is taken as seconds. Text containing the token "min"
/// is parsed as minutes and multiplied by 60; other text is parsed as
/// a bare number of seconds. Fractional values are truncated.
pub fn duration_seconds(input: &DurationInput) -> Result<u32, EncodeError> {
    match input {
        DurationInput::Seconds(secs) => Ok(*secs),
        DurationInput::Text(raw) => {
            let (value, scale) = match raw.find("min") {
                Some(pos) => (&raw[..pos], 60.0),
                None => (raw.as_str(), 1.0),
            };
            let secs = value
                .trim()
                .parse::<f64>()
                .map(|n| n * scale)
                .map_err(|_| EncodeError::InvalidDuration(raw.clone()))?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(EncodeError::InvalidDuration(raw.clone()));
            }
            Ok(secs as u32)
        }
    }
}

/// Canonicalize a power target to whole watts.
///
/// Explicit wattage is used as-is. A percentage (numeric or
/// "<number>% FTP" text) is resolved against `ftp_watts` and rounded.
/// Absent or unreadable percentage text falls back to
/// [`DEFAULT_POWER_PCT`].
pub fn target_power_watts(input: Option<&PowerInput>, ftp_watts: u32) -> u32 {
    let pct = match input {
        Some(PowerInput::Watts(watts)) => return *watts,
        Some(PowerInput::Percent { percentage_ftp }) => match percentage_ftp {
            PercentValue::Number(pct) if pct.is_finite() && *pct >= 0.0 => *pct,
            PercentValue::Number(pct) => {
                warn!(percent = *pct, "out-of-range power percentage, using default");
                DEFAULT_POWER_PCT
            }
            PercentValue::Text(raw) => parse_percent_text(raw).unwrap_or_else(|| {
                warn!(raw = %raw, "unreadable power percentage, using default");
                DEFAULT_POWER_PCT
            }),
        },
        None => DEFAULT_POWER_PCT,
    };
    (ftp_watts as f64 * pct / 100.0).round() as u32
}

/// Parse "<number>% FTP" (or any numeric prefix before '%') text.
fn parse_percent_text(raw: &str) -> Option<f64> {
    let numeric = raw.split('%').next().unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}
