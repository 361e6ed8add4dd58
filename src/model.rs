use serde::{Deserialize, Serialize};

/// One timed subtitle block. `index` is the ordinal as authored and is not
/// unique once cues have been dropped; `start > end` is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub index: i64,
    pub start: f64,
    pub end: f64,
    pub text: Vec<String>,
}

impl Cue {
    pub fn new(index: i64, start: f64, end: f64, text: Vec<String>) -> Self {
        Self {
            index,
            start,
            end,
            text,
        }
    }
}

/// Speakers of the tagged show, in palette order. The order is part of the
/// saved record format: append only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeakerLabel {
    #[default]
    Undetermined,
    BullockS,
    Swearengen,
    GarretA,
    Ellsworth,
    Dority,
    Stubbs,
    Cochran,
    BullockM,
    Star,
    Merrick,
    Trixie,
    Nuttal,
    Farnum,
    Canary,
    Utter,
    Tolliver,
    Hickok,
}

/// Ordinal, variant and display name of every label.
const PALETTE: [(SpeakerLabel, &str); 18] = [
    (SpeakerLabel::Undetermined, "Undetermined"),
    (SpeakerLabel::BullockS, "BullockS"),
    (SpeakerLabel::Swearengen, "Swearengen"),
    (SpeakerLabel::GarretA, "GarretA"),
    (SpeakerLabel::Ellsworth, "Ellsworth"),
    (SpeakerLabel::Dority, "Dority"),
    (SpeakerLabel::Stubbs, "Stubbs"),
    (SpeakerLabel::Cochran, "Cochran"),
    (SpeakerLabel::BullockM, "BullockM"),
    (SpeakerLabel::Star, "Star"),
    (SpeakerLabel::Merrick, "Merrick"),
    (SpeakerLabel::Trixie, "Trixie"),
    (SpeakerLabel::Nuttal, "Nuttal"),
    (SpeakerLabel::Farnum, "Farnum"),
    (SpeakerLabel::Canary, "Canary"),
    (SpeakerLabel::Utter, "Utter"),
    (SpeakerLabel::Tolliver, "Tolliver"),
    (SpeakerLabel::Hickok, "Hickok"),
];

impl SpeakerLabel {
    pub fn all() -> impl Iterator<Item = SpeakerLabel> {
        PALETTE.iter().map(|(label, _)| *label)
    }

    /// `(ordinal, display name)` pairs for UI palettes.
    pub fn palette() -> Vec<(usize, &'static str)> {
        PALETTE
            .iter()
            .enumerate()
            .map(|(ordinal, (_, name))| (ordinal, *name))
            .collect()
    }

    pub fn names() -> Vec<&'static str> {
        PALETTE.iter().map(|(_, name)| *name).collect()
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        PALETTE.get(ordinal).map(|(label, _)| *label)
    }

    pub fn name(self) -> &'static str {
        PALETTE[self.ordinal()].1
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(label, _)| *label)
    }
}

impl std::fmt::Display for SpeakerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedCue {
    pub cue: Cue,
    #[serde(default)]
    pub label: SpeakerLabel,
}

impl TaggedCue {
    pub fn new(cue: Cue) -> Self {
        Self {
            cue,
            label: SpeakerLabel::Undetermined,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.label != SpeakerLabel::Undetermined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_order_matches_ordinals() {
        let palette = SpeakerLabel::palette();
        assert_eq!(palette.len(), 18);
        for (ordinal, label) in SpeakerLabel::all().enumerate() {
            assert_eq!(label.ordinal(), ordinal);
            assert_eq!(palette[ordinal], (ordinal, label.name()));
            assert_eq!(SpeakerLabel::from_ordinal(ordinal), Some(label));
        }
        assert_eq!(SpeakerLabel::from_ordinal(18), None);
    }

    #[test]
    fn display_name_matches_serialized_name() {
        for label in SpeakerLabel::all() {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.name()));
        }
    }

    #[test]
    fn from_name_ignores_case() {
        assert_eq!(SpeakerLabel::from_name("swearengen"), Some(SpeakerLabel::Swearengen));
        assert_eq!(SpeakerLabel::from_name(" Hickok "), Some(SpeakerLabel::Hickok));
        assert_eq!(SpeakerLabel::from_name("Al"), None);
    }

    #[test]
    fn new_tagged_cue_is_undetermined() {
        let t = TaggedCue::new(Cue::new(1, 0.0, 1.0, vec![" Hi".into()]));
        assert_eq!(t.label, SpeakerLabel::Undetermined);
        assert!(!t.is_labeled());
    }
}
