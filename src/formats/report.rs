use crate::{formats::time::format_srt_timestamp, model::TaggedCue};

/// Human review copy of a session: SRT blocks with a `Speaker:` line after
/// each time range. Never read back.
pub fn write_report(cues: &[TaggedCue]) -> String {
    let mut out = String::new();

    for tagged in cues {
        let cue = &tagged.cue;
        out.push_str(&cue.index.to_string());
        out.push('\n');

        out.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(cue.start),
            format_srt_timestamp(cue.end)
        ));

        out.push_str(&format!("Speaker: {}\n", tagged.label));

        for line in &cue.text {
            out.push_str(line);
            out.push('\n');
        }

        out.push('\n');
    }

    out
}
