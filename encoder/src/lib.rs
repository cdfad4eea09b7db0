//! Workout FIT file encoder
//!
//! Turns a structured workout description (name, target FTP, ordered
//! interval list) into a byte-exact FIT workout file: a 14-byte header
//! with an embedded checksum, a stream of definition and data messages
//! (file_id, workout, workout_step), and a trailing CRC-16.
//!
//! The pipeline is a pure function of its input except for the file
//! creation timestamp; [`encode_at`] accepts an explicit time for
//! byte-reproducible output. The returned buffer is handed to the
//! caller — the crate performs no I/O of its own and is safe to call
//! concurrently.

pub mod checksum;
pub mod encoder;
pub mod error;
pub mod messages;
pub mod models;
pub mod normalize;

// Re-export the public surface
pub use encoder::{encode, encode_at, resolve_filename, FIT_EXTENSION};
pub use error::{EncodeError, EncodeResult};
pub use models::{DurationInput, IntervalSpec, PercentValue, PowerInput, WorkoutSpec};
