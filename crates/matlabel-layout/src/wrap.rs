//! Greedy word wrapping against measured widths.

use crate::metrics::{FontFace, TextMeasurer};

/// Greedily pack the words of a single paragraph into lines no wider than
/// `max_width`.
///
/// A word joins the current line when the joined text measures `<=`
/// `max_width`. A paragraph without words yields one empty line, and a word
/// wider than the line is kept whole on a line of its own.
#[must_use]
pub fn wrap_paragraph(
    measurer: &dyn TextMeasurer,
    text: &str,
    face: FontFace,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if measurer.text_width(&candidate, face, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Wrap text that may contain explicit line breaks.
///
/// Carriage returns are dropped, the text is split on `\n`, and every
/// paragraph is wrapped independently. Blank paragraphs are kept as empty
/// lines so they still take vertical space.
#[must_use]
pub fn wrap_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    face: FontFace,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let cleaned = text.replace('\r', "");
    cleaned
        .split('\n')
        .flat_map(|paragraph| wrap_paragraph(measurer, paragraph, face, size, max_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is one point wide per point of size.
    struct FixedAdvance;

    impl TextMeasurer for FixedAdvance {
        #[allow(clippy::cast_precision_loss)]
        fn text_width(&self, text: &str, _face: FontFace, size: f32) -> f32 {
            text.chars().count() as f32 * size
        }
    }

    #[test]
    fn packs_words_greedily() {
        let lines = wrap_paragraph(
            &FixedAdvance,
            "aa bb cc dd",
            FontFace::TimesRoman,
            1.0,
            5.0,
        );
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn exact_fit_joins_the_line() {
        let lines = wrap_paragraph(&FixedAdvance, "abc de", FontFace::TimesRoman, 1.0, 6.0);
        assert_eq!(lines, vec!["abc de"]);
    }

    #[test]
    fn oversized_word_stays_whole() {
        let lines = wrap_paragraph(
            &FixedAdvance,
            "a extraordinarily b",
            FontFace::TimesRoman,
            1.0,
            4.0,
        );
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn empty_paragraph_yields_single_empty_line() {
        let lines = wrap_paragraph(&FixedAdvance, "   \t ", FontFace::TimesRoman, 1.0, 10.0);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn explicit_breaks_and_blank_lines_are_preserved() {
        let lines = wrap_text(
            &FixedAdvance,
            "PP regrind\r\n\r\nnatural  color",
            FontFace::TimesRoman,
            1.0,
            20.0,
        );
        assert_eq!(lines, vec!["PP regrind", "", "natural color"]);
    }
}
