/// Simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_with_the_maximum() {
        assert_eq!(ascii_bar(0, 0, 4), "░░░░");
        assert_eq!(ascii_bar(2, 4, 4), "██░░");
        assert_eq!(ascii_bar(9, 4, 4), "████");
    }
}
