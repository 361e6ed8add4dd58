/// Formats seconds as `HH:MM:SS,mmm`. Negative input clamps to zero and
/// milliseconds are truncated, never rounded up.
pub fn format_srt_timestamp(secs: f64) -> String {
    // Absorbs binary representation error (3723.456 * 1000 can land just
    // below 3723456) without rounding genuine fractions up.
    let ms = (secs.max(0.0) * 1000.0 + 1e-6) as u64;

    let total_seconds = ms / 1000;
    let milli = ms % 1000;

    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02},{milli:03}")
}

/// Parses `HH:MM:SS,mmm` into fractional seconds.
pub fn parse_srt_timestamp(s: &str) -> Result<f64, String> {
    let t = s.trim();

    let parts: Vec<&str> = t.split([':', ',']).collect();
    if parts.len() != 4 {
        return Err(format!("unrecognized timestamp: '{t}'"));
    }

    let field = |raw: &str, what: &str| -> Result<u64, String> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("bad {what} in timestamp: '{t}'"));
        }
        raw.parse::<u64>()
            .map_err(|_| format!("bad {what} in timestamp: '{t}'"))
    };

    let h = field(parts[0], "hours")?;
    let m = field(parts[1], "minutes")?;
    let s2 = field(parts[2], "seconds")?;
    let milli = field(parts[3], "milliseconds")?;

    let ms = h
        .checked_mul(3600)
        .and_then(|v| v.checked_add(m.checked_mul(60)?))
        .and_then(|v| v.checked_add(s2))
        .and_then(|v| v.checked_mul(1000))
        .and_then(|v| v.checked_add(milli))
        .ok_or_else(|| format!("timestamp out of range: '{t}'"))?;

    Ok(ms as f64 / 1000.0)
}

pub fn parse_time_range_arrow(line: &str) -> Result<(f64, f64), String> {
    let (a, b) = line
        .split_once("-->")
        .ok_or_else(|| format!("missing '-->' in time range: '{line}'"))?;
    let start = parse_srt_timestamp(a)?;
    let end = parse_srt_timestamp(b)?;
    Ok((start, end))
}
