//! Text normalization helpers shared by the codec and the matcher.

/// Case-insensitive comparison form of `text`.
///
/// Uses full Unicode lowercasing; this differs from a strict casefold only for
/// a handful of characters (for example `ß` stays `ß`).
pub fn casefold(text: &str) -> String {
    text.to_lowercase()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Normalized lookup key used by the lexical matcher.
///
/// Lowercases, folds dash variants to `-`, and collapses whitespace.
pub fn normalize_term_text(text: &str) -> String {
    let folded: String = casefold(text)
        .chars()
        .map(|ch| if is_dash(ch) { '-' } else { ch })
        .collect();
    normalize_inline_whitespace(folded)
}

fn is_dash(ch: char) -> bool {
    matches!(
        ch,
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' | '\u{FE63}'
            | '\u{FF0D}'
    )
}

/// True when `text` holds a delimiter or line break that would corrupt a table cell.
pub fn breaks_cell(text: &str, delimiter: char) -> bool {
    text.contains(delimiter) || text.contains('\n') || text.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_inline_whitespace_collapses_runs() {
        let input = "Alpha\n\n  Beta\tGamma";
        assert_eq!(normalize_inline_whitespace(input), "Alpha Beta Gamma");
    }

    #[test]
    fn term_text_folds_case_and_dashes() {
        assert_eq!(normalize_term_text("TNF\u{2013}Alpha "), "tnf-alpha");
        assert_eq!(normalize_term_text("  Tumor   necrosis\tfactor"), "tumor necrosis factor");
    }

    #[test]
    fn casefold_is_case_insensitive() {
        assert_eq!(casefold("Apple"), casefold("aPPLE"));
    }

    #[test]
    fn breaks_cell_flags_delimiters_and_newlines() {
        assert!(breaks_cell("a\tb", '\t'));
        assert!(breaks_cell("a\nb", '\t'));
        assert!(!breaks_cell("a,b", '\t'));
        assert!(breaks_cell("a,b", ','));
    }
}
