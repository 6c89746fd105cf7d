//! Classification of raw body text into typed lines.
//!
//! Talk bodies arrive as unstructured text with no markup channel, so
//! structure is recovered heuristically: a line whose letters are all
//! uppercase is a section heading. The heuristic is deliberately simple and
//! must not be "improved": it is the only structure contract the upstream
//! content pipeline has.

/// One newline-delimited line of body text, tagged with its semantic role.
/// `Heading` and `Paragraph` carry the whitespace-trimmed text, which is
/// what gets drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A whitespace-only line; rendered as vertical breathing room
    Blank,
    /// A shouting line: at least one letter, none of them lowercase
    Heading(String),
    /// Everything else, including lines with no letters at all
    Paragraph(String),
}

/// Split `body` into classified lines, one entry per `\n`-delimited line,
/// in source order. Total over any input: any string yields a valid
/// sequence, and an empty body yields no lines at all, matching an absent
/// one.
pub fn classify(body: &str) -> Vec<Line> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('\n').map(classify_line).collect()
}

fn classify_line(line: &str) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    // a heading must contain a letter: digits and punctuation alone never
    // qualify, no matter how loudly they are punctuated
    let has_letter = trimmed.chars().any(char::is_alphabetic);
    if has_letter && trimmed == trimmed.to_uppercase() {
        Line::Heading(trimmed.to_string())
    } else {
        Line::Paragraph(trimmed.to_string())
    }
}
