//! Reading sources and reading/writing session artifacts on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    config::PathsCfg,
    error::{Result, TaggerError},
    formats,
    sanitize::{SanitizePolicy, sanitize_with},
    session::Session,
};

/// Where the artifacts of one episode live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    pub subtitles: PathBuf,
    pub record: PathBuf,
    pub report: PathBuf,
}

impl SessionPaths {
    /// Derives artifact paths next to the media file; a trailing `_` on the
    /// media stem is dropped.
    pub fn for_media(media: &Path, cfg: &PathsCfg) -> Self {
        let stem = media
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = stem.trim_end_matches('_');
        let parent = media.parent().unwrap_or_else(|| Path::new(""));

        Self {
            subtitles: parent.join(format!("{stem}{}", cfg.subtitle_suffix)),
            record: parent.join(format!("{stem}{}", cfg.record_suffix)),
            report: parent.join(format!("{stem}{}", cfg.report_suffix)),
        }
    }
}

/// Parses and sanitizes a subtitle file into a fresh session.
pub fn load_source(path: &Path, policy: &SanitizePolicy) -> Result<Session> {
    let span = tracing::info_span!("load_source", path = %path.display());
    let _g = span.enter();

    let raw = read_existing(path)?;
    tracing::info!(bytes = raw.len(), "read subtitles");

    let parsed = formats::srt::parse_srt(&raw)?;
    let (cues, _report) = sanitize_with(&parsed, policy);
    let session = Session::from_cues(cues)?;

    tracing::info!(cues = session.len(), "session ready");
    Ok(session)
}

/// Reloads a saved record. The returned session is clean with its cursor on
/// the first cue.
pub fn load_session(path: &Path) -> Result<Session> {
    let raw = read_existing(path)?;
    let cues = formats::json::parse_json(&raw).map_err(|reason| TaggerError::CorruptRecord {
        path: path.to_path_buf(),
        reason,
    })?;
    let session = Session::new(cues)?;

    tracing::info!(path = %path.display(), cues = session.len(), "loaded session record");
    Ok(session)
}

/// Writes the record and the report. Both are staged next to their targets
/// before either is replaced, and the record is committed first; a failed
/// save leaves the previous report in place.
pub fn save_session(session: &Session, paths: &SessionPaths) -> Result<()> {
    let record = formats::json::write_json(session.cues())
        .map_err(|e| TaggerError::io(&paths.record, std::io::Error::other(e)))?;
    let report = formats::report::write_report(session.cues());

    let staged_record = stage(&paths.record, &record)?;
    let staged_report = stage(&paths.report, &report)?;
    commit(staged_record, &paths.record)?;
    commit(staged_report, &paths.report)?;

    let progress = session.progress();
    tracing::info!(
        record = %paths.record.display(),
        report = %paths.report.display(),
        labeled = progress.labeled,
        total = progress.total,
        "saved session"
    );
    Ok(())
}

fn read_existing(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TaggerError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(TaggerError::io(path, e)),
    }
}

/// Writes `data` to a temp file in the target's directory. The file is
/// removed if it is dropped before [`commit`].
fn stage(target: &Path, data: &str) -> Result<NamedTempFile> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| TaggerError::io(parent, e))?;

    let temp = NamedTempFile::new_in(parent).map_err(|e| TaggerError::io(parent, e))?;
    fs::write(temp.path(), data).map_err(|e| TaggerError::io(temp.path(), e))?;
    Ok(temp)
}

fn commit(temp: NamedTempFile, target: &Path) -> Result<()> {
    temp.persist(target).map_err(|e| TaggerError::io(target, e.error))?;
    Ok(())
}
