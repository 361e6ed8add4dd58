//! The actor that owns a tagging session and talks to the host.
//!
//! Hosts forward UI intents to [`Tagger::handle`], the player's "seek
//! completed" callback to [`Tagger::on_seek_completed`], and call
//! [`Tagger::tick`] from their update loop.

use std::path::Path;

use crate::{
    error::{Result, TaggerError},
    model::SpeakerLabel,
    session::{PlaybackWindow, Session},
    store::{self, SessionPaths},
};

/// Playback backend. Seeking is asynchronous: the host reports completion
/// through [`Tagger::on_seek_completed`].
pub trait MediaPlayer {
    fn prepare(&mut self);
    fn seek(&mut self, time: f64);
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
}

/// Confirmation dialogs shown before data is overwritten or thrown away.
pub trait FilePrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
    fn confirm_discard(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Navigate(i64),
    Assign(SpeakerLabel),
    Replay,
    Save,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved { cursor: usize },
    Labeled { label: SpeakerLabel, complete: bool },
    Replayed,
    Saved,
    Loaded { cues: usize },
    /// The operator declined a confirmation.
    Cancelled,
    /// Load was asked for but nothing has been saved yet.
    NoRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub ordinal: usize,
    pub name: &'static str,
    pub selected: bool,
}

pub struct Tagger<P, F> {
    session: Session,
    paths: SessionPaths,
    player: P,
    prompt: F,
    window: PlaybackWindow,
    playing: bool,
}

impl<P: MediaPlayer, F: FilePrompt> Tagger<P, F> {
    /// Takes ownership of the session and asks the player to prepare.
    pub fn new(session: Session, paths: SessionPaths, mut player: P, prompt: F) -> Self {
        player.prepare();
        let window = session.playback_window();
        Self {
            session,
            paths,
            player,
            prompt,
            window,
            playing: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn paths(&self) -> &SessionPaths {
        &self.paths
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn prompt_mut(&mut self) -> &mut F {
        &mut self.prompt
    }

    pub fn window(&self) -> PlaybackWindow {
        self.window
    }

    /// Called once the player has finished preparing.
    pub fn on_prepared(&mut self) {
        // Some backends ignore the first seek unless they have played once.
        self.player.play();
        self.player.pause();
        self.play_current();
    }

    pub fn on_seek_completed(&mut self) {
        self.player.play();
        self.playing = true;
    }

    /// Pauses once playback passes the end of the current window. Returns
    /// true when it paused.
    pub fn tick(&mut self) -> bool {
        if self.playing && self.player.current_time() >= self.window.stop {
            self.player.pause();
            self.playing = false;
            return true;
        }
        false
    }

    pub fn handle(&mut self, intent: Intent) -> Result<Outcome> {
        tracing::debug!(?intent, cursor = self.session.cursor(), "intent");
        match intent {
            Intent::Navigate(offset) => {
                self.session.navigate(offset);
                self.play_current();
                Ok(Outcome::Moved {
                    cursor: self.session.cursor(),
                })
            }
            Intent::Assign(label) => Ok(self.assign(label)),
            Intent::Replay => {
                self.play_current();
                Ok(Outcome::Replayed)
            }
            Intent::Save => self.save(),
            Intent::Load => self.load(),
        }
    }

    pub fn palette(&self) -> Vec<PaletteEntry> {
        let current = self.session.current().label;
        SpeakerLabel::palette()
            .into_iter()
            .map(|(ordinal, name)| PaletteEntry {
                ordinal,
                name,
                selected: ordinal == current.ordinal(),
            })
            .collect()
    }

    fn assign(&mut self, label: SpeakerLabel) -> Outcome {
        let was_complete = self.session.is_complete();
        self.session.set_label(label);
        let complete = self.session.is_complete();
        if complete && !was_complete {
            tracing::info!(cues = self.session.len(), "every cue has a speaker");
        }
        Outcome::Labeled { label, complete }
    }

    fn save(&mut self) -> Result<Outcome> {
        let record = &self.paths.record;
        if record.exists() && !self.prompt.confirm_overwrite(record) {
            tracing::info!(path = %record.display(), "save cancelled");
            return Ok(Outcome::Cancelled);
        }

        store::save_session(&self.session, &self.paths)?;
        self.session.mark_clean();
        Ok(Outcome::Saved)
    }

    /// Replaces the session with the saved record. On any failure the
    /// current session is left as it was.
    fn load(&mut self) -> Result<Outcome> {
        if self.session.is_dirty() && !self.prompt.confirm_discard() {
            tracing::info!("load cancelled, unsaved labels kept");
            return Ok(Outcome::Cancelled);
        }

        let loaded = match store::load_session(&self.paths.record) {
            Ok(session) => session,
            Err(TaggerError::NotFound { path }) => {
                tracing::info!(path = %path.display(), "no saved session to load");
                return Ok(Outcome::NoRecord);
            }
            Err(e) => return Err(e),
        };

        self.session = loaded;
        self.play_current();
        Ok(Outcome::Loaded {
            cues: self.session.len(),
        })
    }

    fn play_current(&mut self) {
        self.window = self.session.playback_window();
        self.playing = false;
        // Playback resumes from on_seek_completed.
        self.player.seek(self.window.seek);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cue, TaggedCue};

    #[derive(Debug, Default)]
    struct FakePlayer {
        calls: Vec<String>,
        time: f64,
    }

    impl MediaPlayer for FakePlayer {
        fn prepare(&mut self) {
            self.calls.push("prepare".into());
        }
        fn seek(&mut self, time: f64) {
            self.time = time;
            self.calls.push(format!("seek {time:.2}"));
        }
        fn play(&mut self) {
            self.calls.push("play".into());
        }
        fn pause(&mut self) {
            self.calls.push("pause".into());
        }
        fn current_time(&self) -> f64 {
            self.time
        }
    }

    #[derive(Debug, Default)]
    struct FakePrompt {
        answer: bool,
        asked: Vec<&'static str>,
    }

    impl FilePrompt for FakePrompt {
        fn confirm_overwrite(&mut self, _path: &Path) -> bool {
            self.asked.push("overwrite");
            self.answer
        }
        fn confirm_discard(&mut self) -> bool {
            self.asked.push("discard");
            self.answer
        }
    }

    fn session() -> Session {
        Session::from_cues(
            (0..12)
                .map(|i| {
                    let start = i as f64 * 3.0 + 1.0;
                    Cue::new(i + 1, start, start + 1.0, vec![format!(" cue {i}")])
                })
                .collect(),
        )
        .unwrap()
    }

    fn tagger(dir: &Path, answer: bool) -> Tagger<FakePlayer, FakePrompt> {
        let paths = SessionPaths {
            subtitles: dir.join("ep_eng.srt"),
            record: dir.join("ep_tags.json"),
            report: dir.join("ep_custom.srt"),
        };
        Tagger::new(
            session(),
            paths,
            FakePlayer::default(),
            FakePrompt {
                answer,
                ..FakePrompt::default()
            },
        )
    }

    #[test]
    fn prepare_then_seek_to_first_cue() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), true);
        t.on_prepared();
        assert_eq!(t.player().calls, vec!["prepare", "play", "pause", "seek 0.90"]);
    }

    #[test]
    fn navigation_seeks_and_playback_stops_after_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), true);
        assert_eq!(t.handle(Intent::Navigate(10)).unwrap(), Outcome::Moved { cursor: 10 });
        assert!((t.player().time - 30.9).abs() < 1e-9);

        assert!(!t.tick(), "not playing before the seek completes");
        t.on_seek_completed();
        assert_eq!(t.player().calls.last().unwrap(), "play");

        t.player_mut().time = 32.2;
        assert!(!t.tick());
        t.player_mut().time = 32.25;
        assert!(t.tick());
        assert!(!t.tick(), "pauses only once");

        assert_eq!(t.handle(Intent::Navigate(10)).unwrap(), Outcome::Moved { cursor: 11 });
    }

    #[test]
    fn assign_marks_selected_palette_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), true);
        let outcome = t.handle(Intent::Assign(SpeakerLabel::Canary)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Labeled {
                label: SpeakerLabel::Canary,
                complete: false
            }
        );
        assert!(t.session().is_dirty());
        let selected: Vec<_> = t.palette().into_iter().filter(|e| e.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Canary");
    }

    #[test]
    fn save_only_prompts_when_record_exists() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), false);
        t.handle(Intent::Assign(SpeakerLabel::Utter)).unwrap();

        assert_eq!(t.handle(Intent::Save).unwrap(), Outcome::Saved);
        assert!(t.prompt.asked.is_empty());
        assert!(!t.session().is_dirty());
        assert!(t.paths().report.exists());

        t.handle(Intent::Assign(SpeakerLabel::Farnum)).unwrap();
        assert_eq!(t.handle(Intent::Save).unwrap(), Outcome::Cancelled);
        assert_eq!(t.prompt.asked, vec!["overwrite"]);
        assert!(t.session().is_dirty());
    }

    #[test]
    fn load_without_record_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), true);
        t.handle(Intent::Navigate(3)).unwrap();
        assert_eq!(t.handle(Intent::Load).unwrap(), Outcome::NoRecord);
        assert_eq!(t.session().cursor(), 3);
    }

    #[test]
    fn dirty_load_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), false);
        t.handle(Intent::Save).unwrap();
        t.handle(Intent::Assign(SpeakerLabel::Merrick)).unwrap();

        assert_eq!(t.handle(Intent::Load).unwrap(), Outcome::Cancelled);
        assert_eq!(t.prompt.asked, vec!["discard"]);
        assert_eq!(t.session().current().label, SpeakerLabel::Merrick);

        t.prompt.answer = true;
        assert_eq!(t.handle(Intent::Load).unwrap(), Outcome::Loaded { cues: 12 });
        assert_eq!(t.session().current().label, SpeakerLabel::Undetermined);
        assert!(!t.session().is_dirty());
    }

    #[test]
    fn load_resets_cursor_and_restores_labels() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), true);
        t.handle(Intent::Navigate(2)).unwrap();
        t.handle(Intent::Assign(SpeakerLabel::Tolliver)).unwrap();
        t.handle(Intent::Save).unwrap();
        t.handle(Intent::Navigate(5)).unwrap();

        assert_eq!(t.handle(Intent::Load).unwrap(), Outcome::Loaded { cues: 12 });
        assert_eq!(t.session().cursor(), 0);
        assert_eq!(t.session().cues()[2].label, SpeakerLabel::Tolliver);
        assert_eq!(t.player().calls.last().unwrap(), "seek 0.90");
    }

    #[test]
    fn failed_load_leaves_session_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tagger(dir.path(), true);
        t.handle(Intent::Navigate(4)).unwrap();
        t.handle(Intent::Assign(SpeakerLabel::Star)).unwrap();
        std::fs::write(&t.paths().record, "{ \"schema\": 1 }").unwrap();

        let err = t.handle(Intent::Load).unwrap_err();
        assert!(matches!(err, TaggerError::CorruptRecord { .. }), "{err}");
        assert_eq!(t.session().cursor(), 4);
        assert_eq!(t.session().current().label, SpeakerLabel::Star);
        assert!(t.session().is_dirty());
    }

    #[test]
    fn completing_every_cue_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SessionPaths {
            subtitles: dir.path().join("a.srt"),
            record: dir.path().join("a.json"),
            report: dir.path().join("a_custom.srt"),
        };
        let cue = Cue::new(1, 0.0, 1.0, vec![" x".into()]);
        let one = Session::new(vec![TaggedCue::new(cue)]).unwrap();
        let mut t = Tagger::new(one, paths, FakePlayer::default(), FakePrompt::default());
        assert_eq!(
            t.handle(Intent::Assign(SpeakerLabel::Hickok)).unwrap(),
            Outcome::Labeled {
                label: SpeakerLabel::Hickok,
                complete: true
            }
        );
    }
}
