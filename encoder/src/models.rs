//! Workout input model
//!
//! The encoder accepts the JSON shape produced by the planning layer.
//! Two historical client conventions are in circulation — string
//! durations with a percentage dict ({"duration": "10 min",
//! "target_power": {"percentage_ftp": "95% FTP"}}) and integer seconds
//! with a numeric percentage field — so the flexible fields are
//! untagged unions accepting both.

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Structured workout description: the input aggregate for one encode
/// call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSpec {
    /// Workout display name (encoded as a 16-byte fixed string)
    pub name: String,
    /// Functional Threshold Power baseline for percentage targets
    pub ftp_watts: u32,
    /// Ordered workout steps; an empty list is replaced by one default
    /// steady interval at encode time
    pub intervals: Vec<IntervalSpec>,
    /// Requested download filename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl WorkoutSpec {
    /// Parse a workout request from a JSON document.
    ///
    /// Malformed JSON and missing required keys (`name`, `ftp_watts`,
    /// `intervals`) are reported as [`EncodeError::InvalidRequest`]
    /// with the serde message, which names the offending field.
    pub fn from_json_str(body: &str) -> Result<Self, EncodeError> {
        serde_json::from_str(body).map_err(|e| EncodeError::InvalidRequest(e.to_string()))
    }
}

/// One workout step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalSpec {
    /// Step display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Interval type tag, used as the step name when no name is given
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub interval_type: Option<String>,
    /// Step length: bare seconds or "<number> min" text
    pub duration: DurationInput,
    /// Power target; absent means the 70 % FTP default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_power: Option<PowerInput>,
}

impl IntervalSpec {
    /// Resolve the step name: explicit name, then the type tag, then a
    /// synthesized "Step N" label (1-based).
    pub fn step_name(&self, index: usize) -> String {
        self.name
            .clone()
            .or_else(|| self.interval_type.clone())
            .unwrap_or_else(|| format!("Step {}", index + 1))
    }

    /// The substitute step used when a workout arrives with no
    /// intervals: 30 minutes steady at 70 % of FTP.
    pub fn default_steady() -> Self {
        Self {
            name: Some("Steady".to_string()),
            interval_type: None,
            duration: DurationInput::Text("30 min".to_string()),
            target_power: None,
        }
    }
}

/// Accepted duration forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    /// Bare number of seconds
    Seconds(u32),
    /// Text, either "<number> min" or a numeric-second string
    Text(String),
}

/// Accepted target-power forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PowerInput {
    /// Explicit wattage
    Watts(u32),
    /// Percentage of FTP
    Percent { percentage_ftp: PercentValue },
}

/// Percentage carried either as a number or as "<number>% FTP" text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PercentValue {
    Number(f64),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_duration_percentage_dict_convention() {
        let body = r#"{
            "name": "Threshold",
            "ftp_watts": 300,
            "intervals": [
                {"name": "Warmup", "duration": "10 min"},
                {"name": "Main", "duration": 600,
                 "target_power": {"percentage_ftp": "95% FTP"}}
            ]
        }"#;
        let spec = WorkoutSpec::from_json_str(body).unwrap();
        assert_eq!(spec.name, "Threshold");
        assert_eq!(spec.ftp_watts, 300);
        assert_eq!(spec.intervals.len(), 2);
        assert!(matches!(spec.intervals[0].duration, DurationInput::Text(_)));
        assert!(matches!(spec.intervals[1].duration, DurationInput::Seconds(600)));
        assert!(matches!(
            spec.intervals[1].target_power,
            Some(PowerInput::Percent {
                percentage_ftp: PercentValue::Text(_)
            })
        ));
    }

    #[test]
    fn test_parse_numeric_percentage_and_watts_convention() {
        let body = r#"{
            "name": "Sweet Spot",
            "ftp_watts": 250,
            "intervals": [
                {"type": "steady", "duration": 1200,
                 "target_power": {"percentage_ftp": 88}},
                {"name": "Cooldown", "duration": 300, "target_power": 120}
            ]
        }"#;
        let spec = WorkoutSpec::from_json_str(body).unwrap();
        assert!(matches!(
            spec.intervals[0].target_power,
            Some(PowerInput::Percent {
                percentage_ftp: PercentValue::Number(p)
            }) if (p - 88.0).abs() < f64::EPSILON
        ));
        assert!(matches!(
            spec.intervals[1].target_power,
            Some(PowerInput::Watts(120))
        ));
    }

    #[test]
    fn test_missing_required_field_names_it() {
        let body = r#"{"name": "No FTP", "intervals": []}"#;
        let err = WorkoutSpec::from_json_str(body).unwrap_err();
        match err {
            EncodeError::InvalidRequest(msg) => assert!(msg.contains("ftp_watts")),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_invalid_request() {
        let err = WorkoutSpec::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, EncodeError::InvalidRequest(_)));
    }

    #[test]
    fn test_step_name_fallback_chain() {
        let mut interval = IntervalSpec {
            name: Some("Warmup".to_string()),
            interval_type: Some("ramp".to_string()),
            duration: DurationInput::Seconds(60),
            target_power: None,
        };
        assert_eq!(interval.step_name(0), "Warmup");

        interval.name = None;
        assert_eq!(interval.step_name(0), "ramp");

        interval.interval_type = None;
        assert_eq!(interval.step_name(0), "Step 1");
        assert_eq!(interval.step_name(4), "Step 5");
    }

    #[test]
    fn test_optional_filename() {
        let body = r#"{"name": "W", "ftp_watts": 200, "intervals": [],
                       "filename": "tuesday"}"#;
        let spec = WorkoutSpec::from_json_str(body).unwrap();
        assert_eq!(spec.filename.as_deref(), Some("tuesday"));
    }
}
