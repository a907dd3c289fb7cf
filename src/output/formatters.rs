//! Formatting utilities for terminal output

/// "1 attempt" / "N attempts"
#[must_use]
pub fn attempts_label(attempts: u32) -> String {
    if attempts == 1 {
        "1 attempt".to_string()
    } else {
        format!("{attempts} attempts")
    }
}

/// Best score or a dash when none is recorded
#[must_use]
pub fn best_label(best: Option<u32>) -> String {
    best.map_or_else(|| "-".to_string(), |value| value.to_string())
}

/// Guess history joined with arrows
#[must_use]
pub fn history_line(history: &[i32]) -> String {
    history
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_pluralization() {
        assert_eq!(attempts_label(0), "0 attempts");
        assert_eq!(attempts_label(1), "1 attempt");
        assert_eq!(attempts_label(7), "7 attempts");
    }

    #[test]
    fn best_label_dash_when_missing() {
        assert_eq!(best_label(None), "-");
        assert_eq!(best_label(Some(4)), "4");
    }

    #[test]
    fn history_joined_in_order() {
        assert_eq!(history_line(&[10, 40, 25]), "10 → 40 → 25");
        assert_eq!(history_line(&[]), "");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
