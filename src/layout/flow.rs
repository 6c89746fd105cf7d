//! The page flow controller: decides, for each classified line in order,
//! whether it fits on the current page, and opens a new page when it does
//! not.
//!
//! Overflow is always decided from a measurement taken *before* anything is
//! drawn, so a block lands whole on the current page or whole on the next
//! one, never partially on both.

use crate::colour::Colour;
use crate::error::RenderError;
use crate::font::SpanFont;
use crate::layout::classify::Line;
use crate::layout::margins::Margins;
use crate::metrics::{FontMetrics, Size};
use crate::page::{Page, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use log::debug;

/// Vertical advance for a blank body line
pub const BLANK_SPACER: Pt = Pt(10.0);
/// Extra gap above a heading, unless it is the first block on its page
pub const HEADING_LEAD_GAP: Pt = Pt(16.0);
/// Gap below a heading
pub const HEADING_TRAIL_GAP: Pt = Pt(8.0);
/// Gap below a paragraph
pub const PARAGRAPH_TRAIL_GAP: Pt = Pt(6.0);

/// The fixed geometry every page of a document shares
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
    /// The y coordinate of the page bottom boundary for body content; the
    /// cursor never commits a block that would end below it. Computed from
    /// the footer band, never less than the bottom margin.
    pub floor: Pt,
}

impl PageGeometry {
    pub fn content_box(&self) -> Rect {
        Rect {
            x1: self.margins.left,
            y1: self.margins.bottom,
            x2: self.size.0 - self.margins.right,
            y2: self.size.1 - self.margins.top,
        }
    }

    /// Where the cursor starts on pages after the first (bare top margin)
    pub fn top(&self) -> Pt {
        self.size.1 - self.margins.top
    }
}

/// The fonts and colour body content is set in
#[derive(Debug, Clone)]
pub struct FlowStyles {
    pub heading: SpanFont,
    pub body: SpanFont,
    pub colour: Colour,
}

/// Per-page mutable layout state. Owned by [flow_lines] for the duration of
/// one render call and discarded afterwards.
struct Cursor {
    y: Pt,
    /// No line has been emitted on the current page yet
    first_line: bool,
}

/// Flow classified `lines` onto pages. `pages` must already hold the open
/// first page (with its chrome drawn), and `start_y` is the cursor position
/// just below that chrome. `open_page` supplies each continuation page,
/// footer already in place.
pub fn flow_lines<M, F>(
    lines: &[Line],
    metrics: &M,
    geom: &PageGeometry,
    styles: &FlowStyles,
    start_y: Pt,
    pages: &mut Vec<Page>,
    mut open_page: F,
) -> Result<(), RenderError>
where
    M: FontMetrics + ?Sized,
    F: FnMut() -> Page,
{
    let mut cursor = Cursor {
        y: start_y,
        first_line: true,
    };

    for line in lines {
        match line {
            Line::Blank => {
                if cursor.y < geom.floor {
                    break_page(pages, &mut open_page, &mut cursor, geom);
                }
                cursor.y -= BLANK_SPACER;
            }
            Line::Heading(text) => {
                let lead = if cursor.first_line {
                    Pt::ZERO
                } else {
                    HEADING_LEAD_GAP
                };
                let size = checked_measure(metrics, text, styles.heading, geom)?;
                if cursor.y - lead - size.height < geom.floor {
                    break_page(pages, &mut open_page, &mut cursor, geom);
                    let height =
                        place_block(pages, metrics, text, styles.heading, styles.colour, cursor.y, geom)?;
                    cursor.y -= height + HEADING_TRAIL_GAP;
                } else {
                    let top = cursor.y - lead;
                    let height =
                        place_block(pages, metrics, text, styles.heading, styles.colour, top, geom)?;
                    cursor.y = top - height - HEADING_TRAIL_GAP;
                }
            }
            Line::Paragraph(text) => {
                let size = checked_measure(metrics, text, styles.body, geom)?;
                if cursor.y - size.height < geom.floor {
                    break_page(pages, &mut open_page, &mut cursor, geom);
                }
                let height =
                    place_block(pages, metrics, text, styles.body, styles.colour, cursor.y, geom)?;
                cursor.y -= height + PARAGRAPH_TRAIL_GAP;
            }
        }
        cursor.first_line = false;
    }

    Ok(())
}

fn break_page<F>(pages: &mut Vec<Page>, open_page: &mut F, cursor: &mut Cursor, geom: &PageGeometry)
where
    F: FnMut() -> Page,
{
    debug!(
        "page {} full at y={}, opening page {}",
        pages.len(),
        cursor.y,
        pages.len() + 1
    );
    pages.push(open_page());
    cursor.y = geom.top();
    cursor.first_line = true;
}

/// Measure a block, rejecting non-finite or negative dimensions. Such
/// values mean the metrics collaborator is broken; the render is abandoned.
pub(crate) fn checked_measure<M: FontMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    font: SpanFont,
    geom: &PageGeometry,
) -> Result<Size, RenderError> {
    let size = metrics.measure(text, font, geom.content_box().width());
    let valid = |v: Pt| v.0.is_finite() && v >= Pt::ZERO;
    if !valid(size.height) || !valid(size.width) {
        return Err(RenderError::InvalidMetrics(text.to_string()));
    }
    Ok(size)
}

/// Wrap `text` and commit one span per wrapped line to the current page,
/// with the block's top edge at `top`. Returns the committed height.
pub(crate) fn place_block<M: FontMetrics + ?Sized>(
    pages: &mut [Page],
    metrics: &M,
    text: &str,
    font: SpanFont,
    colour: Colour,
    top: Pt,
    geom: &PageGeometry,
) -> Result<Pt, RenderError> {
    let content = geom.content_box();
    let lines = metrics.wrap(text, font, content.width());
    let line_height = metrics.line_height(font);
    let ascent = metrics.ascent(font);
    if !line_height.0.is_finite() || line_height < Pt::ZERO || !ascent.0.is_finite() {
        return Err(RenderError::InvalidMetrics(text.to_string()));
    }

    let page = pages.last_mut().expect("flow always has an open page");
    for (i, line) in lines.iter().enumerate() {
        page.add_span(SpanLayout {
            text: line.clone(),
            font,
            colour,
            coords: (content.x1, top - ascent - line_height * i as f32),
        });
    }

    Ok(line_height * lines.len() as f32)
}
