//! Line-oriented terminal front end for [`Tagger`].
//!
//! There is no media decoding here: [`HeadlessPlayer`] only tracks the
//! position a real player would be at, and a seek completes as soon as the
//! command that caused it has been handled.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use anyhow::Result;

use crate::{
    model::SpeakerLabel,
    tagger::{FilePrompt, Intent, MediaPlayer, Outcome, Tagger},
};

#[derive(Debug, Default)]
pub struct HeadlessPlayer {
    time: f64,
    pending_seek: bool,
    playing: bool,
}

impl HeadlessPlayer {
    fn finish_seek(&mut self) -> bool {
        std::mem::take(&mut self.pending_seek)
    }

    /// Jumps to `time` as if the media had played through to it.
    fn play_until(&mut self, time: f64) {
        if self.playing && time > self.time {
            self.time = time;
        }
    }
}

impl MediaPlayer for HeadlessPlayer {
    fn prepare(&mut self) {
        tracing::debug!("player prepared");
    }

    fn seek(&mut self, time: f64) {
        tracing::debug!(time, "seek");
        self.time = time.max(0.0);
        self.pending_seek = true;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
        tracing::debug!(time = self.time, "paused");
    }

    fn current_time(&self) -> f64 {
        self.time
    }
}

/// Declines every confirmation unless the operator forced the command with
/// a trailing `!`.
#[derive(Debug, Default)]
pub struct ForcePrompt {
    force: bool,
}

impl FilePrompt for ForcePrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        if !self.force {
            tracing::warn!(path = %path.display(), "record exists, use `save!` to overwrite");
        }
        self.force
    }

    fn confirm_discard(&mut self) -> bool {
        if !self.force {
            tracing::warn!("unsaved labels, use `load!` to discard them");
        }
        self.force
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Intent { intent: Intent, force: bool },
    Show,
    Help,
    Quit,
}

/// Maps one input line to a command. Navigation keys follow the usual
/// layout: `a`/`s` go back, `d`/`f` go forward, the outer keys by a page.
pub fn parse_command(line: &str, page_step: i64) -> Option<Command> {
    let word = line.trim();
    let intent = |intent| {
        Some(Command::Intent {
            intent,
            force: false,
        })
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "r" | "replay" => intent(Intent::Replay),
        "d" | "next" => intent(Intent::Navigate(1)),
        "s" | "prev" => intent(Intent::Navigate(-1)),
        "f" => intent(Intent::Navigate(page_step)),
        "a" => intent(Intent::Navigate(-page_step)),
        "save" => intent(Intent::Save),
        "load" => intent(Intent::Load),
        "save!" => Some(Command::Intent {
            intent: Intent::Save,
            force: true,
        }),
        "load!" => Some(Command::Intent {
            intent: Intent::Load,
            force: true,
        }),
        "p" | "show" => Some(Command::Show),
        "?" | "h" | "help" => Some(Command::Help),
        "q" | "quit" => Some(Command::Quit),
        _ => {
            let label = match word.parse::<usize>() {
                Ok(ordinal) => SpeakerLabel::from_ordinal(ordinal),
                Err(_) => SpeakerLabel::from_name(word),
            }?;
            intent(Intent::Assign(label))
        }
    }
}

pub type TerminalTagger = Tagger<HeadlessPlayer, ForcePrompt>;

/// Runs commands from `input` until it ends or `q` is read.
pub fn run<R: BufRead, W: Write>(
    tagger: &mut TerminalTagger,
    input: R,
    mut out: W,
    page_step: i64,
) -> Result<()> {
    tagger.on_prepared();
    settle(tagger);
    print_palette(tagger, &mut out)?;
    print_current(tagger, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_command(&line, page_step) else {
            writeln!(out, "unknown command: {}", line.trim())?;
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(&mut out)?,
            Command::Show => {
                print_palette(tagger, &mut out)?;
                print_current(tagger, &mut out)?;
            }
            Command::Intent { intent, force } => {
                tagger.prompt_mut().force = force;
                let result = tagger.handle(intent);
                tagger.prompt_mut().force = false;

                match result {
                    Ok(outcome) => {
                        settle(tagger);
                        report_outcome(outcome, &mut out)?;
                        print_current(tagger, &mut out)?;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "command failed");
                        writeln!(out, "error: {e}")?;
                    }
                }
            }
        }
    }

    if tagger.session().is_dirty() {
        tracing::warn!("exiting with unsaved labels");
    }
    Ok(())
}

/// Completes a pending seek and lets playback run to the end of the window.
fn settle(tagger: &mut TerminalTagger) {
    if tagger.player_mut().finish_seek() {
        tagger.on_seek_completed();
        let stop = tagger.window().stop;
        tagger.player_mut().play_until(stop);
        tagger.tick();
    }
}

fn report_outcome<W: Write>(outcome: Outcome, out: &mut W) -> Result<()> {
    match outcome {
        Outcome::Labeled { complete: true, .. } => writeln!(out, "every cue has a speaker")?,
        Outcome::Saved => writeln!(out, "saved")?,
        Outcome::Loaded { cues } => writeln!(out, "loaded {cues} cues")?,
        Outcome::Cancelled => writeln!(out, "cancelled")?,
        Outcome::NoRecord => writeln!(out, "nothing saved yet")?,
        Outcome::Moved { .. } | Outcome::Labeled { .. } | Outcome::Replayed => {}
    }
    Ok(())
}

fn print_current<W: Write>(tagger: &TerminalTagger, out: &mut W) -> Result<()> {
    let session = tagger.session();
    let progress = session.progress();
    let current = session.current();
    let dirty = if session.is_dirty() { " *" } else { "" };

    writeln!(
        out,
        "[{}/{} labeled {}{}] {}:{}",
        progress.position,
        progress.total,
        progress.labeled,
        dirty,
        current.label,
        current.cue.text.join(" ")
    )?;
    Ok(())
}

fn print_palette<W: Write>(tagger: &TerminalTagger, out: &mut W) -> Result<()> {
    let entries: Vec<String> = tagger
        .palette()
        .into_iter()
        .map(|e| {
            if e.selected {
                format!("[{}:{}]", e.ordinal, e.name)
            } else {
                format!("{}:{}", e.ordinal, e.name)
            }
        })
        .collect();
    writeln!(out, "{}", entries.join(" "))?;
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "d/s next/prev, f/a page forward/back, enter or r replay, <ordinal|name> assign speaker,\n\
         p show, save, load (save!/load! skip confirmation), q quit"
    )?;
    Ok(())
}
