use serde::{Deserialize, Serialize};

use crate::model::{Cue, SpeakerLabel, TaggedCue};

pub const SCHEMA: &str = "sub-tagger.session";
pub const VERSION: u32 = 1;

/// Machine-reloadable session record. `labels` pins the label table the
/// record was written with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionRecord {
    pub schema: String,
    pub version: u32,
    pub labels: Vec<String>,
    pub cues: Vec<JsonCue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonCue {
    pub index: i64,
    pub start: f64,
    pub end: f64,
    pub text: Vec<String>,
    pub label: SpeakerLabel,
}

pub fn write_json(cues: &[TaggedCue]) -> Result<String, serde_json::Error> {
    let record = SessionRecord {
        schema: SCHEMA.to_string(),
        version: VERSION,
        labels: SpeakerLabel::names().into_iter().map(String::from).collect(),
        cues: cues
            .iter()
            .map(|t| JsonCue {
                index: t.cue.index,
                start: t.cue.start,
                end: t.cue.end,
                text: t.cue.text.clone(),
                label: t.label,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&record)
}

/// Decodes a record written by [`write_json`]. The error string explains
/// what could not be reconstructed.
pub fn parse_json(input: &str) -> Result<Vec<TaggedCue>, String> {
    let record: SessionRecord = serde_json::from_str(input).map_err(|e| e.to_string())?;

    if record.schema != SCHEMA {
        return Err(format!("unexpected schema '{}'", record.schema));
    }
    if record.version != VERSION {
        return Err(format!("unsupported version {}", record.version));
    }
    if record.labels != SpeakerLabel::names() {
        return Err("label table does not match this build".to_string());
    }

    Ok(record
        .cues
        .into_iter()
        .map(|c| TaggedCue {
            cue: Cue {
                index: c.index,
                start: c.start,
                end: c.end,
                text: c.text,
            },
            label: c.label,
        })
        .collect())
}
