use crate::{font::SpanFont, units::Pt};

/// A wrapped text block's bounding box
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: Pt,
    pub height: Pt,
}

/// The capability that computes wrapped text dimensions. Layout depends on
/// no other numeric oracle: the flow controller measures every candidate
/// block through this trait before committing it to a page, and the page
/// writer wraps through the same trait, so measurement and drawing always
/// agree.
///
/// Injected into the renderer at construction, which keeps the core free of
/// ambient text-layout state and lets tests substitute a deterministic fake.
pub trait FontMetrics {
    /// Break `text` into lines no wider than `max_width`. Whitespace runs
    /// collapse at break points; a word wider than `max_width` is broken at
    /// character granularity rather than overflowing. Returns no lines for
    /// whitespace-only input.
    fn wrap(&self, text: &str, font: SpanFont, max_width: Pt) -> Vec<String>;

    /// Width of a single unwrapped run
    fn width_of(&self, text: &str, font: SpanFont) -> Pt;

    /// Vertical offset between successive baselines
    fn line_height(&self, font: SpanFont) -> Pt;

    /// Distance from the baseline to the top of the face
    fn ascent(&self, font: SpanFont) -> Pt;

    /// Word-wrap-aware bounding box of `text` at `max_width`
    fn measure(&self, text: &str, font: SpanFont, max_width: Pt) -> Size {
        let lines = self.wrap(text, font, max_width);
        let width = lines
            .iter()
            .map(|line| self.width_of(line, font))
            .fold(Pt::ZERO, Pt::max);
        Size {
            width,
            height: self.line_height(font) * lines.len() as f32,
        }
    }
}

/// The built-in metrics provider, backed by the static AFM advance-width
/// tables of the base-14 faces and a greedy word wrap.
#[derive(Debug, Default, Copy, Clone)]
pub struct AfmMetrics;

impl AfmMetrics {
    /// Split a word that is wider than `max_width` into character-level
    /// pieces that fit. Always makes progress: a piece holds at least one
    /// character even if that character alone overflows.
    fn force_break(&self, word: &str, font: SpanFont, max_width: Pt) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = Pt::ZERO;
        for ch in word.chars() {
            let advance = font.face.advance(ch, font.size);
            if !piece.is_empty() && width + advance > max_width {
                pieces.push(std::mem::take(&mut piece));
                width = Pt::ZERO;
            }
            piece.push(ch);
            width += advance;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

impl FontMetrics for AfmMetrics {
    fn wrap(&self, text: &str, font: SpanFont, max_width: Pt) -> Vec<String> {
        let space = font.face.advance(' ', font.size);
        let mut lines: Vec<String> = Vec::new();

        for hard_line in text.split('\n') {
            let mut current = String::new();
            let mut current_width = Pt::ZERO;

            for word in hard_line.split_whitespace() {
                let word_width = self.width_of(word, font);

                if current.is_empty() {
                    if word_width > max_width {
                        let mut pieces = self.force_break(word, font, max_width);
                        // the last piece stays open so following words can join it
                        if let Some(last) = pieces.pop() {
                            current_width = self.width_of(&last, font);
                            current = last;
                        }
                        lines.append(&mut pieces);
                    } else {
                        current = word.to_string();
                        current_width = word_width;
                    }
                } else if current_width + space + word_width > max_width {
                    lines.push(std::mem::take(&mut current));
                    if word_width > max_width {
                        let mut pieces = self.force_break(word, font, max_width);
                        if let Some(last) = pieces.pop() {
                            current_width = self.width_of(&last, font);
                            current = last;
                        }
                        lines.append(&mut pieces);
                    } else {
                        current = word.to_string();
                        current_width = word_width;
                    }
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space + word_width;
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }

        lines
    }

    fn width_of(&self, text: &str, font: SpanFont) -> Pt {
        font.face.width_of(text, font.size)
    }

    fn line_height(&self, font: SpanFont) -> Pt {
        font.face.line_height(font.size)
    }

    fn ascent(&self, font: SpanFont) -> Pt {
        font.face.ascent(font.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Typeface;

    fn body() -> SpanFont {
        SpanFont {
            face: Typeface::Helvetica,
            size: Pt(16.0),
        }
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = AfmMetrics.wrap("Watch your step.", body(), Pt(468.0));
        assert_eq!(lines, vec!["Watch your step.".to_string()]);
    }

    #[test]
    fn whitespace_only_text_has_no_lines() {
        assert!(AfmMetrics.wrap("", body(), Pt(468.0)).is_empty());
        assert!(AfmMetrics.wrap("   \t ", body(), Pt(468.0)).is_empty());
        let size = AfmMetrics.measure("", body(), Pt(468.0));
        assert_eq!(size.height, Pt::ZERO);
    }

    #[test]
    fn long_text_wraps_and_no_line_overflows() {
        let text = "Always keep your work area clear of debris and report any \
                    spills to your supervisor immediately so they can be dealt with.";
        let max = Pt(200.0);
        let lines = AfmMetrics.wrap(text, body(), max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(AfmMetrics.width_of(line, body()) <= max);
        }
        // nothing dropped
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn oversized_word_is_force_broken() {
        let text = "antidisestablishmentarianism";
        let max = Pt(50.0);
        let lines = AfmMetrics.wrap(text, body(), max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(AfmMetrics.width_of(line, body()) <= max);
        }
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn measure_height_is_line_count_times_line_height() {
        let font = body();
        let size = AfmMetrics.measure("Watch your step.", font, Pt(468.0));
        assert_eq!(size.height, AfmMetrics.line_height(font));

        let tall = AfmMetrics.measure(&"word ".repeat(60), font, Pt(200.0));
        let lines = AfmMetrics.wrap(&"word ".repeat(60), font, Pt(200.0));
        assert_eq!(tall.height, AfmMetrics.line_height(font) * lines.len() as f32);
    }

    #[test]
    fn narrower_max_width_never_shrinks_height() {
        let text = "Report all incidents to the site office before the end of shift.";
        let wide = AfmMetrics.measure(text, body(), Pt(400.0));
        let narrow = AfmMetrics.measure(text, body(), Pt(120.0));
        assert!(narrow.height >= wide.height);
    }
}
