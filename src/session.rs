use crate::{
    error::{Result, TaggerError},
    model::{Cue, SpeakerLabel, TaggedCue},
};

/// Seconds of media played before a cue starts, covering player seek latency.
pub const PRE_ROLL: f64 = 0.1;
/// Seconds of media played after a cue ends so trailing audio finishes.
pub const POST_ROLL: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackWindow {
    pub seek: f64,
    pub stop: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the cursor.
    pub position: usize,
    pub total: usize,
    pub labeled: usize,
}

/// One tagging pass over a subtitle track. Cues are fixed at construction;
/// only their labels change.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    cues: Vec<TaggedCue>,
    cursor: usize,
    dirty: bool,
}

impl Session {
    pub fn new(cues: Vec<TaggedCue>) -> Result<Self> {
        if cues.is_empty() {
            return Err(TaggerError::EmptyInput);
        }
        Ok(Self {
            cues,
            cursor: 0,
            dirty: false,
        })
    }

    pub fn from_cues(cues: Vec<Cue>) -> Result<Self> {
        Self::new(cues.into_iter().map(TaggedCue::new).collect())
    }

    pub fn cues(&self) -> &[TaggedCue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Always false for a constructed session.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.check_cursor();
        self.cursor
    }

    pub fn current(&self) -> &TaggedCue {
        self.check_cursor();
        &self.cues[self.cursor]
    }

    /// Checked access by position; the only lookup that reports
    /// `IndexOutOfRange` instead of clamping.
    pub fn get(&self, index: usize) -> Result<&TaggedCue> {
        self.cues.get(index).ok_or(TaggerError::IndexOutOfRange {
            index,
            len: self.cues.len(),
        })
    }

    /// Moves the cursor by `offset`, clamped to the first and last cue.
    pub fn navigate(&mut self, offset: i64) {
        let target = (self.cursor as i64).saturating_add(offset);
        self.cursor = clamp_index(target, self.cues.len());
        self.check_cursor();
    }

    /// Moves the cursor to `index`, clamped to the last cue.
    pub fn go_to(&mut self, index: usize) {
        self.cursor = index.min(self.cues.len() - 1);
        self.check_cursor();
    }

    pub fn set_label(&mut self, label: SpeakerLabel) {
        self.check_cursor();
        let cursor = self.cursor;
        let tagged = &mut self.cues[cursor];
        tracing::debug!(
            cursor,
            index = tagged.cue.index,
            from = %tagged.label,
            to = %label,
            "label assigned"
        );
        tagged.label = label;
        self.dirty = true;
    }

    pub fn playback_window(&self) -> PlaybackWindow {
        let cue = &self.current().cue;
        PlaybackWindow {
            seek: cue.start - PRE_ROLL,
            stop: cue.end + POST_ROLL,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.cursor + 1,
            total: self.cues.len(),
            labeled: self.cues.iter().filter(|t| t.is_labeled()).count(),
        }
    }

    /// True once every cue carries a speaker other than `Undetermined`.
    pub fn is_complete(&self) -> bool {
        self.cues.iter().all(TaggedCue::is_labeled)
    }

    fn check_cursor(&self) {
        debug_assert!(
            self.cursor < self.cues.len(),
            "cursor {} out of range for {} cues",
            self.cursor,
            self.cues.len()
        );
    }
}

fn clamp_index(target: i64, len: usize) -> usize {
    let last = len.saturating_sub(1) as i64;
    target.clamp(0, last) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(n: usize) -> Session {
        let cues = (0..n)
            .map(|i| {
                let start = i as f64 * 2.0;
                Cue::new(i as i64 + 1, start, start + 1.5, vec![format!(" line {i}")])
            })
            .collect();
        Session::from_cues(cues).unwrap()
    }

    #[test]
    fn empty_session_is_rejected() {
        assert!(matches!(Session::from_cues(vec![]), Err(TaggerError::EmptyInput)));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut s = session(5);
        for start in 0..5 {
            s.go_to(start);
            s.navigate(-100);
            assert_eq!(s.cursor(), 0);
            s.go_to(start);
            s.navigate(100);
            assert_eq!(s.cursor(), 4);
        }
    }

    #[test]
    fn navigation_steps() {
        let mut s = session(25);
        s.navigate(1);
        assert_eq!(s.cursor(), 1);
        s.navigate(10);
        assert_eq!(s.cursor(), 11);
        s.navigate(-10);
        assert_eq!(s.cursor(), 1);
        s.navigate(i64::MAX);
        assert_eq!(s.cursor(), 24);
        s.navigate(i64::MIN);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn go_to_clamps() {
        let mut s = session(3);
        s.go_to(99);
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn labeling_marks_dirty_until_clean() {
        let mut s = session(3);
        assert!(!s.is_dirty());
        s.navigate(1);
        s.set_label(SpeakerLabel::Swearengen);
        assert!(s.is_dirty());
        assert_eq!(s.current().label, SpeakerLabel::Swearengen);
        assert_eq!(s.cues()[0].label, SpeakerLabel::Undetermined);
        s.mark_clean();
        assert!(!s.is_dirty());
    }

    #[test]
    fn playback_window_pads_the_cue() {
        let mut s = session(3);
        s.navigate(1);
        let w = s.playback_window();
        assert!((w.seek - (2.0 - PRE_ROLL)).abs() < 1e-12);
        assert!((w.stop - (3.5 + POST_ROLL)).abs() < 1e-12);
    }

    #[test]
    fn progress_counts_labels() {
        let mut s = session(2);
        assert_eq!(
            s.progress(),
            Progress {
                position: 1,
                total: 2,
                labeled: 0
            }
        );
        s.set_label(SpeakerLabel::Star);
        s.navigate(1);
        assert!(!s.is_complete());
        s.set_label(SpeakerLabel::Trixie);
        assert!(s.is_complete());
        assert_eq!(s.progress().labeled, 2);
        assert_eq!(s.progress().position, 2);
    }

    #[test]
    fn get_reports_out_of_range() {
        let s = session(2);
        assert!(s.get(1).is_ok());
        assert!(matches!(
            s.get(2),
            Err(TaggerError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
