//! Greedy word wrapping against measured text widths
//!
//! Kept independent of the PDF layer so the packing arithmetic is testable
//! on its own. `measure` maps a candidate line to its width in points.

/// Wrap `text` into lines no wider than `max_width`.
///
/// Words are packed greedily; a single word that alone exceeds `max_width`
/// is hard-split character by character so pathological tokens (URLs, long
/// runs without spaces) cannot loop forever or overflow the column. Leading
/// and trailing whitespace is dropped; interior runs of whitespace collapse
/// to a single space.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if measure(word) > max_width {
            // Flush whatever was accumulated, then split the oversized word.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = hard_split(word, max_width, &measure, &mut lines);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else {
            let candidate_width = measure(&format!("{current} {word}"));
            if candidate_width <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split an oversized word into full lines, returning the unfinished tail.
fn hard_split<F>(word: &str, max_width: f32, measure: &F, lines: &mut Vec<String>) -> String
where
    F: Fn(&str) -> f32,
{
    let mut piece = String::new();
    for c in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(c);
        // Always keep at least one character per line so zero-progress
        // cannot occur even if a single glyph is wider than the column.
        if !piece.is_empty() && measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut piece));
            piece.push(c);
        } else {
            piece = candidate;
        }
    }
    piece
}

/// Shorten `text` with a trailing `...` so its measured width stays within
/// `max_width`. Text that already fits is returned unchanged.
pub fn truncate_with_ellipsis<F>(text: &str, max_width: f32, measure: F) -> String
where
    F: Fn(&str) -> f32,
{
    if measure(text) <= max_width {
        return text.to_string();
    }

    let mut kept: String = text.to_string();
    while !kept.is_empty() {
        kept.pop();
        let candidate = format!("{}...", kept.trim_end());
        if measure(&candidate) <= max_width {
            return candidate;
        }
    }
    "...".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::metrics::helvetica;

    fn measure(text: &str) -> f32 {
        helvetica().width_pt(text, 10.0)
    }

    #[test]
    fn fitting_text_comes_back_as_a_single_line() {
        let lines = wrap_text("died at home", 200.0, measure);
        assert_eq!(lines, vec!["died at home"]);
    }

    #[test]
    fn whitespace_is_normalized() {
        let lines = wrap_text("  survived by   his wife  ", 200.0, measure);
        assert_eq!(lines, vec!["survived by his wife"]);
    }

    #[test]
    fn no_wrapped_line_exceeds_the_column() {
        let text = "Beloved husband of the late Anna Marie, dear father of \
                    Robert, Margaret and Eleanor, survived by eleven grandchildren";
        let lines = wrap_text(text, 120.0, measure);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line) <= 120.0, "line too wide: {line:?}");
        }
    }

    #[test]
    fn wrapping_loses_no_words() {
        let text = "interred at Mount Pleasant Cemetery beside her late husband";
        let lines = wrap_text(text, 90.0, measure);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn oversized_token_is_hard_split_without_character_loss() {
        let token: String = std::iter::repeat('a').take(200).collect();
        let lines = wrap_text(&token, 60.0, measure);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line) <= 60.0);
        }
        assert_eq!(lines.concat(), token);
    }

    #[test]
    fn hard_split_handles_a_column_narrower_than_one_glyph() {
        // Each 'W' at 10pt is ~9.4pt wide; the column is narrower than that.
        let lines = wrap_text("WWWW", 5.0, measure);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.concat(), "WWWW");
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(wrap_text("", 100.0, measure), vec![String::new()]);
    }

    #[test]
    fn truncation_appends_ellipsis_and_respects_the_width() {
        let truncated = truncate_with_ellipsis("Vanderheyden-Castellanos", 60.0, measure);
        assert!(truncated.ends_with("..."));
        assert!(measure(&truncated) <= 60.0);
    }

    #[test]
    fn fitting_text_is_not_truncated() {
        assert_eq!(truncate_with_ellipsis("Ng", 60.0, measure), "Ng");
    }
}
