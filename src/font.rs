use crate::{
    refs::{ObjectReferences, RefType},
    Pt,
};
use pdf_writer::{Name, Pdf};

/// The fixed set of typefaces a talk sheet is set in. These are PDF base-14
/// faces: every conforming reader supplies them, so nothing is embedded in
/// the generated file and no font files are loaded at runtime.
///
/// Glyph advance widths come from the static AFM tables below (thousandths
/// of an em, ASCII 0x20..=0x7E), with an average-width fallback for
/// everything outside that range. The tables are an approximation of what a
/// real rasterizer will do, but they are exact for the base-14 faces
/// themselves, which is what matters for line breaking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Typeface {
    Helvetica,
    HelveticaBold,
}

/// A typeface at a specific size; everything a span of text needs to know
/// about how it will be drawn, short of its colour.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub face: Typeface,
    pub size: Pt,
}

// AFM global vertical metrics shared by the Helvetica family.
const ASCENDER: f32 = 718.0;
const DESCENDER: f32 = -207.0;

// Default line height factor; the AFM format carries no line gap, and 1.2em
// is the conventional single-spacing value for the base-14 faces.
const LINE_SPACING: f32 = 1.2;

impl Typeface {
    /// Every typeface the crate can emit, in PDF resource order. The
    /// position of a face in this array is its font resource index, i.e.
    /// `/F0` is Helvetica and `/F1` is Helvetica-Bold on every page.
    pub const ALL: [Typeface; 2] = [Typeface::Helvetica, Typeface::HelveticaBold];

    /// The PostScript base font name written into the PDF
    pub fn base_name(self) -> &'static str {
        match self {
            Typeface::Helvetica => "Helvetica",
            Typeface::HelveticaBold => "Helvetica-Bold",
        }
    }

    pub(crate) fn resource_index(self) -> usize {
        match self {
            Typeface::Helvetica => 0,
            Typeface::HelveticaBold => 1,
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Typeface::Helvetica => &HELVETICA_WIDTHS,
            Typeface::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    fn average_width(self) -> u16 {
        match self {
            Typeface::Helvetica => 513,
            Typeface::HelveticaBold => 536,
        }
    }

    /// The horizontal advance of a single character at the given size
    pub fn advance(self, ch: char, size: Pt) -> Pt {
        let code = ch as usize;
        let millis = if (0x20..=0x7e).contains(&code) {
            self.widths()[code - 0x20]
        } else {
            self.average_width()
        };
        size * (millis as f32 / 1000.0)
    }

    /// Calculate the width of a given string of text at the given size.
    /// Ignores newlines.
    pub fn width_of(self, text: &str, size: Pt) -> Pt {
        text.chars()
            .filter(|&ch| ch != '\n')
            .map(|ch| self.advance(ch, size))
            .sum()
    }

    /// Calculate the ascent (distance from the baseline to the top of the
    /// face) for the given size
    pub fn ascent(self, size: Pt) -> Pt {
        size * (ASCENDER / 1000.0)
    }

    /// Calculate the descent (distance from the baseline to the bottom of
    /// the face) for the given size. Note: this is negative
    pub fn descent(self, size: Pt) -> Pt {
        size * (DESCENDER / 1000.0)
    }

    /// The default vertical offset between successive baselines at the
    /// given size
    pub fn line_height(self, size: Pt) -> Pt {
        size * LINE_SPACING
    }

    pub(crate) fn write(self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font(self.resource_index()));
        let mut font = writer.type1_font(id);
        font.base_font(Name(self.base_name().as_bytes()));
        font.encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// Map a character to its WinAnsi (CP-1252) code, the encoding every span
/// of text is written in. Returns [None] for characters outside the code
/// page; callers substitute '?'.
pub(crate) fn winansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match ch {
        // ASCII passes through untouched
        _ if (0x20..=0x7e).contains(&code) => Some(code as u8),
        // Latin-1 supplement maps 1:1
        _ if (0xa0..=0xff).contains(&code) => Some(code as u8),
        // the CP-1252 specials in 0x80..=0x9F
        '\u{20ac}' => Some(0x80), // euro
        '\u{201a}' => Some(0x82),
        '\u{0192}' => Some(0x83),
        '\u{201e}' => Some(0x84),
        '\u{2026}' => Some(0x85), // ellipsis
        '\u{2020}' => Some(0x86),
        '\u{2021}' => Some(0x87),
        '\u{02c6}' => Some(0x88),
        '\u{2030}' => Some(0x89),
        '\u{0160}' => Some(0x8a),
        '\u{2039}' => Some(0x8b),
        '\u{0152}' => Some(0x8c),
        '\u{017d}' => Some(0x8e),
        '\u{2018}' => Some(0x91), // left single quote
        '\u{2019}' => Some(0x92), // right single quote
        '\u{201c}' => Some(0x93), // left double quote
        '\u{201d}' => Some(0x94), // right double quote
        '\u{2022}' => Some(0x95), // bullet
        '\u{2013}' => Some(0x96), // en dash
        '\u{2014}' => Some(0x97), // em dash
        '\u{02dc}' => Some(0x98),
        '\u{2122}' => Some(0x99), // trade mark
        '\u{0161}' => Some(0x9a),
        '\u{203a}' => Some(0x9b),
        '\u{0153}' => Some(0x9c),
        '\u{017e}' => Some(0x9e),
        '\u{0178}' => Some(0x9f),
        _ => None,
    }
}

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em,
/// straight from the Adobe AFM.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
     278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
     556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
     278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
     667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
     722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
     278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
     556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
     556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
     334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 0x20..=0x7E, in 1/1000 em.
#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
     278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
     556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
     333, 333, 584, 584, 584, 611, 975,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
     722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
     722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
     333, 278, 333, 584, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
     556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
     611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
     389, 280, 389, 584,
];
