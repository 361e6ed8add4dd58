//! Subtitle dialogue cleaning and speaker tagging.
//!
//! Raw SRT text goes through [`formats::srt::parse_srt`] and
//! [`sanitize::sanitize`] into a [`Session`], which an operator labels cue by
//! cue through a [`tagger::Tagger`]. Sessions are saved as a JSON record that
//! reloads exactly, plus a human-readable report.

pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod host;
pub mod model;
pub mod pipeline;
pub mod sanitize;
pub mod session;
pub mod store;
pub mod tagger;

pub use error::{Result, TaggerError};
pub use model::{Cue, SpeakerLabel, TaggedCue};
pub use sanitize::{keep_allowed_chars, sanitize};
pub use session::Session;
