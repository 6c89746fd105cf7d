use crate::colour::Colour;
use crate::font::{winansi_byte, SpanFont, Typeface};
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};
use std::io::Write;

/// A single line of positioned text. `coords` is the baseline origin of the
/// line in page space (origin bottom-left, y increasing upwards).
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A placed image, scaled to fill `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Id<Image>,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Image(ImageLayout),
}

/// One finished page: its geometry plus the ordered draw operations that
/// were committed to it. Pages are sealed by the flow controller moving on;
/// nothing is ever drawn to a page after the next one is opened.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where body content can live, i.e. within the margins
    pub content_box: Rect,
    /// The committed draw operations, in draw order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Margins) -> Page {
        let (width, height) = size;
        Page {
            media_box: Rect {
                x1: Pt::ZERO,
                y1: Pt::ZERO,
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// The text of every span on the page, in draw order. Layout tests and
    /// callers inspecting a composed document use this; rendering does not.
    pub fn span_texts(&self) -> Vec<&str> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(span) => Some(span.text.as_str()),
                PageContents::Image(_) => None,
            })
            .collect()
    }

    fn render(&self) -> Vec<u8> {
        if self.contents.is_empty() {
            return Vec::default();
        }
        let mut content: Vec<u8> = Vec::default();

        let mut current_font: Option<SpanFont> = None;
        let mut current_colour: Option<Colour> = None;

        for page_content in self.contents.iter() {
            match page_content {
                PageContents::Text(span) => {
                    if current_font != Some(span.font) {
                        current_font = Some(span.font);
                        writeln!(
                            &mut content,
                            "/F{} {} Tf",
                            span.font.face.resource_index(),
                            span.font.size
                        )
                        .unwrap();
                    }
                    if current_colour != Some(span.colour) {
                        current_colour = Some(span.colour);
                        match span.colour {
                            Colour::RGB { r, g, b } => {
                                writeln!(&mut content, "{r} {g} {b} rg").unwrap()
                            }
                            Colour::Grey { g } => writeln!(&mut content, "{g} g").unwrap(),
                        }
                    }

                    writeln!(&mut content, "BT").unwrap();
                    writeln!(&mut content, "{} {} Td", span.coords.0, span.coords.1).unwrap();
                    content.push(b'(');
                    for ch in span.text.chars() {
                        let byte = winansi_byte(ch).unwrap_or(b'?');
                        if byte == b'(' || byte == b')' || byte == b'\\' {
                            content.push(b'\\');
                        }
                        content.push(byte);
                    }
                    content.extend_from_slice(b") Tj\n");
                    writeln!(&mut content, "ET").unwrap();
                }
                PageContents::Image(image) => {
                    writeln!(&mut content, "q").unwrap();
                    writeln!(
                        &mut content,
                        "{} 0 0 {} {} {} cm",
                        image.position.width(),
                        image.position.height(),
                        image.position.x1,
                        image.position.y1
                    )
                    .unwrap();
                    writeln!(&mut content, "/I{} Do", image.image.index()).unwrap();
                    writeln!(&mut content, "Q").unwrap();
                }
            }
        }

        content
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) {
        let id = refs.get(RefType::Page(page_index)).unwrap();
        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(refs.get(RefType::PageTree).unwrap());

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for face in Typeface::ALL {
            resource_fonts.pair(
                Name(format!("F{}", face.resource_index()).as_bytes()),
                refs.get(RefType::Font(face.resource_index())).unwrap(),
            );
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (i, _) in images.iter() {
            resource_xobjects.pair(
                Name(format!("I{}", i.index()).as_bytes()),
                refs.get(RefType::Image(i.index())).unwrap(),
            );
        }
        resource_xobjects.finish();
        resources.finish();

        let content_id = refs.gen(RefType::ContentForPage(page_index));
        page.contents(content_id);
        page.finish();

        let rendered = self.render();
        writer.stream(content_id, rendered.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::pagesize::LETTER;

    fn span(text: &str) -> SpanLayout {
        SpanLayout {
            text: text.into(),
            font: SpanFont {
                face: Typeface::Helvetica,
                size: Pt(16.0),
            },
            colour: colours::BLACK,
            coords: (Pt(72.0), Pt(650.0)),
        }
    }

    #[test]
    fn content_box_is_inset_by_margins() {
        let page = Page::new(LETTER, Margins::all(Pt(72.0)));
        assert_eq!(page.content_box.x1, Pt(72.0));
        assert_eq!(page.content_box.x2, Pt(612.0 - 72.0));
        assert_eq!(page.content_box.y2, Pt(792.0 - 72.0));
    }

    #[test]
    fn renders_winansi_literal_string() {
        let mut page = Page::new(LETTER, Margins::all(Pt(72.0)));
        page.add_span(span("Fire Safety"));
        let content = page.render();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("/F0 16 Tf"));
        assert!(text.contains("(Fire Safety) Tj"));
    }

    #[test]
    fn escapes_parentheses_and_backslashes() {
        let mut page = Page::new(LETTER, Margins::all(Pt(72.0)));
        page.add_span(span(r"a(b)c\d"));
        let content = page.render();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains(r"(a\(b\)c\\d) Tj"));
    }

    #[test]
    fn substitutes_unmappable_characters() {
        let mut page = Page::new(LETTER, Margins::all(Pt(72.0)));
        page.add_span(span("snow ☃ man"));
        let content = page.render();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("(snow ? man) Tj"));
    }
}
