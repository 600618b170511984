/// Formats seconds as `MM:SS`. Anything that is not a finite, non-negative
/// number renders as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Slider fill as a percentage, or `None` while the duration is unknown.
pub fn slider_percent(current_time: f64, duration: Option<f64>) -> Option<f64> {
    let duration = duration?;
    if !current_time.is_finite() {
        return Some(0.0);
    }
    Some((current_time / duration).clamp(0.0, 1.0) * 100.0)
}

/// Two-stop gradient that paints the played part of the seek track.
pub fn slider_fill(percent: f64, played_color: &str, remaining_color: &str) -> String {
    format!(
        "linear-gradient(to right, {played_color} {percent}%, {remaining_color} {percent}%)"
    )
}

pub fn download_filename(title: &str, extension: &str) -> String {
    format!("{title}.{extension}")
}

/// Normalizes a host-reported duration: NaN, infinite and non-positive
/// values mean "not known yet".
pub fn known_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}
