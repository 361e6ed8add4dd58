use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};

use crate::{
    cli::{CleanCmd, ReportCmd, TagCmd},
    config::Config,
    formats,
    host::{self, ForcePrompt, HeadlessPlayer},
    model::{Cue, SpeakerLabel},
    sanitize::sanitize_with,
    store::{self, SessionPaths},
    tagger::Tagger,
};

pub fn run_clean(cmd: CleanCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("clean", input = cmd.input.as_str());
    let _g = span.enter();

    let raw = read_input_to_string(&cmd.input)?;
    tracing::info!(bytes = raw.len(), "read input");

    let parsed = formats::srt::parse_srt(&raw)
        .with_context(|| format!("failed parsing subtitles from {}", cmd.input))?;
    let (cues, _report) = sanitize_with(&parsed, &cfg.sanitize);

    log_cue_summary(&cues, cfg);

    let rendered = formats::srt::write_srt(&cues);

    if cmd.stdout {
        print!("{rendered}");
        tracing::info!(mode = "stdout", "wrote output");
        return Ok(());
    }

    let out_path = derive_output_path(&cmd.input, cmd.output.as_deref(), ".clean.srt")?;
    write_output(&out_path, &rendered, cmd.overwrite)?;
    tracing::info!(path = out_path.as_str(), "wrote output file");

    Ok(())
}

pub fn run_tag(cmd: TagCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("tag", media = %cmd.media.display());
    let _g = span.enter();

    let mut paths = SessionPaths::for_media(&cmd.media, &cfg.paths);
    if let Some(subtitles) = cmd.subtitles {
        paths.subtitles = subtitles;
    }

    let session = if cmd.resume {
        store::load_session(&paths.record)?
    } else {
        store::load_source(&paths.subtitles, &cfg.sanitize)?
    };
    tracing::info!(cues = session.len(), resume = cmd.resume, "tagging session opened");

    let mut tagger = Tagger::new(
        session,
        paths,
        HeadlessPlayer::default(),
        ForcePrompt::default(),
    );

    let stdin = std::io::stdin();
    host::run(
        &mut tagger,
        stdin.lock(),
        std::io::stdout().lock(),
        cfg.navigation.page_step,
    )
}

pub fn run_report(cmd: ReportCmd) -> Result<()> {
    let span = tracing::info_span!("report", record = %cmd.record.display());
    let _g = span.enter();

    let session = store::load_session(&cmd.record)?;
    let rendered = formats::report::write_report(session.cues());

    if cmd.stdout {
        print!("{rendered}");
        tracing::info!(mode = "stdout", "wrote output");
        return Ok(());
    }

    let input = cmd.record.to_string_lossy();
    let out_path = derive_output_path(&input, cmd.output.as_deref(), "_custom.srt")?;
    write_output(&out_path, &rendered, cmd.overwrite)?;
    tracing::info!(path = out_path.as_str(), "wrote output file");

    Ok(())
}

pub fn run_palette() -> Result<()> {
    for (ordinal, name) in SpeakerLabel::palette() {
        println!("{ordinal:>2}  {name}");
    }
    Ok(())
}

fn read_input_to_string(input: &str) -> Result<String> {
    if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed reading {input}"))
    }
}

fn log_cue_summary(cues: &[Cue], cfg: &Config) {
    let duration = cues
        .iter()
        .map(|c| c.end)
        .fold(0.0_f64, f64::max);
    tracing::info!(cues = cues.len(), duration_secs = duration, "cue summary");

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_cue_samples.min(cues.len());
        for c in cues.iter().take(n) {
            tracing::debug!(
                index = c.index,
                start = c.start,
                end = c.end,
                text = c.text.join(" ").as_str(),
                "cue sample"
            );
        }
    }
}

/// `<dir>/<stem><suffix>` next to the input unless an explicit output is given.
fn derive_output_path(input: &str, output: Option<&str>, suffix: &str) -> Result<String> {
    if let Some(o) = output {
        return Ok(o.to_string());
    }

    if input == "-" {
        return Err(anyhow!(
            "output path required when input is stdin and --stdout is not set"
        ));
    }

    let p = Path::new(input);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad input filename"))?;

    let parent = p.parent().unwrap_or_else(|| Path::new("."));
    let out = parent.join(format!("{stem}{suffix}"));
    Ok(out.to_string_lossy().to_string())
}

fn write_output(path: &str, data: &str, overwrite: bool) -> Result<()> {
    if Path::new(path).exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {path}"
        ));
    }
    fs::write(path, data).with_context(|| format!("failed writing {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_defaults_next_to_input() {
        let p = derive_output_path("/subs/ep.srt", None, ".clean.srt").unwrap();
        assert_eq!(p, "/subs/ep.clean.srt");
        let p = derive_output_path("/subs/ep.srt", Some("out.srt"), ".clean.srt").unwrap();
        assert_eq!(p, "out.srt");
        assert!(derive_output_path("-", None, ".clean.srt").is_err());
    }

    #[test]
    fn clean_writes_sanitized_srt_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ep.srt");
        fs::write(
            &input,
            "1\n00:00:01,000 --> 00:00:02,000\n(yells)\n\n2\n00:00:03,000 --> 00:00:04,000\nDAN: Hey!\n",
        )
        .unwrap();
        let cmd = || CleanCmd {
            input: input.to_string_lossy().to_string(),
            output: None,
            stdout: false,
            overwrite: false,
        };

        run_clean(cmd(), &Config::default()).unwrap();
        let written = fs::read_to_string(dir.path().join("ep.clean.srt")).unwrap();
        assert_eq!(written, "2\n00:00:03,000 --> 00:00:04,000\n Hey!\n\n");

        assert!(run_clean(cmd(), &Config::default()).is_err());
    }
}
