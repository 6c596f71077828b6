//! Plain-text pieces shared by the simulators' summaries.

/// Width of every bar, in characters.
pub const BAR_WIDTH: usize = 30;

/// Entries at or below this probability are left out of shooting summaries.
pub const LISTING_CUTOFF: f64 = 0.001;

/// A two-sided bar: `█` for the attacker's share, `▓` for the defender's,
/// padded with spaces to [`BAR_WIDTH`].
pub fn outcome_bar(win: f64, lose: f64) -> String {
    let bar = format!("{}{}", "█".repeat(cells(win)), "▓".repeat(cells(lose)));
    format!("{bar:<width$}", width = BAR_WIDTH)
}

/// A one-sided bar filled to `fraction` with `█`, the rest `░`.
pub fn fill_bar(fraction: f64) -> String {
    let filled = cells(fraction);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// `p` as a percentage with `decimals` places, e.g. `12.5%`.
pub fn percent(p: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", p * 100.0)
}

/// "Win by N" or "Lose by N" for a non-zero melee delta.
pub fn outcome_label(delta: i32) -> String {
    if delta > 0 {
        format!("Win by {delta}")
    } else {
        format!("Lose by {}", delta.unsigned_abs())
    }
}

fn cells(fraction: f64) -> usize {
    let n = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64) as usize;
    n.min(BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_bar_is_padded() {
        let bar = outcome_bar(0.5, 0.25);
        assert_eq!(bar.chars().count(), BAR_WIDTH);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 15);
        assert_eq!(bar.chars().filter(|&c| c == '▓').count(), 7);
        assert!(bar.ends_with(' '));
    }

    #[test]
    fn fill_bar_is_full_width() {
        let bar = fill_bar(0.5);
        assert_eq!(bar.chars().count(), BAR_WIDTH);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 15);
        assert_eq!(fill_bar(2.0), "█".repeat(BAR_WIDTH));
        assert_eq!(fill_bar(-1.0), "░".repeat(BAR_WIDTH));
    }

    #[test]
    fn percentages() {
        assert_eq!(percent(0.125, 1), "12.5%");
        assert_eq!(percent(0.0123, 2), "1.23%");
        assert_eq!(percent(1.0, 0), "100%");
    }

    #[test]
    fn labels() {
        assert_eq!(outcome_label(3), "Win by 3");
        assert_eq!(outcome_label(-2), "Lose by 2");
    }
}
