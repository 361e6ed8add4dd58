use crate::{
    error::{Result, TaggerError},
    formats::time::{format_srt_timestamp, parse_time_range_arrow},
    model::Cue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Index(i64),
    Time,
    Text,
}

fn classify(line: &str) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Ok(index) = line.trim().parse::<i64>() {
        return LineKind::Index(index);
    }
    if line.contains("-->") {
        return LineKind::Time;
    }
    LineKind::Text
}

/// Cue being accumulated, with the line its index appeared on.
struct Pending {
    line_no: usize,
    index: i64,
    range: Option<(f64, f64)>,
    text: Vec<String>,
}

impl Pending {
    fn finish(self) -> Result<Cue> {
        let (start, end) = self.range.ok_or_else(|| {
            TaggerError::parse(
                self.line_no,
                format!("cue {} has no time range", self.index),
            )
        })?;
        Ok(Cue::new(self.index, start, end, self.text))
    }
}

/// Splits SRT text into cues, keeping text verbatim and in source order.
pub fn parse_srt(input: &str) -> Result<Vec<Cue>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut cues: Vec<Cue> = Vec::new();
    let mut pending: Option<Pending> = None;

    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;

        match classify(line) {
            LineKind::Blank => {}
            LineKind::Index(index) => {
                if let Some(done) = pending.take() {
                    cues.push(done.finish()?);
                }
                pending = Some(Pending {
                    line_no,
                    index,
                    range: None,
                    text: Vec::new(),
                });
            }
            LineKind::Time => {
                let cue = pending
                    .as_mut()
                    .ok_or_else(|| TaggerError::parse(line_no, "time range before any cue index"))?;
                if cue.range.is_some() {
                    return Err(TaggerError::parse(
                        line_no,
                        format!("second time range in cue {}", cue.index),
                    ));
                }
                let range =
                    parse_time_range_arrow(line).map_err(|e| TaggerError::parse(line_no, e))?;
                cue.range = Some(range);
            }
            LineKind::Text => {
                let cue = pending
                    .as_mut()
                    .ok_or_else(|| TaggerError::parse(line_no, "text before any cue index"))?;
                if cue.range.is_none() {
                    return Err(TaggerError::parse(
                        line_no,
                        format!("text before the time range of cue {}", cue.index),
                    ));
                }
                cue.text.push(line.to_string());
            }
        }
    }

    if let Some(done) = pending.take() {
        cues.push(done.finish()?);
    }

    tracing::debug!(cues = cues.len(), "parsed subtitle source");
    Ok(cues)
}

/// Renders cues as plain SRT, keeping their authored indices.
pub fn write_srt(cues: &[Cue]) -> String {
    let mut out = String::new();

    for cue in cues {
        out.push_str(&cue.index.to_string());
        out.push('\n');

        out.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(cue.start),
            format_srt_timestamp(cue.end)
        ));

        for line in &cue.text {
            out.push_str(line);
            out.push('\n');
        }

        out.push('\n');
    }

    out
}
