use crate::artifact::{write_artifact, Artifact, ArtifactIds, RandomIds};
use crate::colour::colours;
use crate::document::Document;
use crate::error::RenderError;
use crate::font::{SpanFont, Typeface};
use crate::image::Image;
use crate::info::Info;
use crate::layout::{
    checked_measure, classify, flow_lines, place_block, FlowStyles, Margins, PageGeometry,
};
use crate::metrics::{AfmMetrics, FontMetrics};
use crate::page::{ImageLayout, Page, SpanLayout};
use crate::pagesize::LETTER;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;
use log::debug;
use std::path::PathBuf;

/// The font the first-page title is set in
pub const TITLE_FONT: SpanFont = SpanFont {
    face: Typeface::HelveticaBold,
    size: Pt(24.0),
};
/// The font section headings are set in
pub const HEADING_FONT: SpanFont = SpanFont {
    face: Typeface::HelveticaBold,
    size: Pt(16.0),
};
/// The font body paragraphs are set in
pub const BODY_FONT: SpanFont = SpanFont {
    face: Typeface::Helvetica,
    size: Pt(16.0),
};
/// The font the per-page footer is set in
pub const FOOTER_FONT: SpanFont = SpanFont {
    face: Typeface::Helvetica,
    size: Pt(10.0),
};

/// The attribution line drawn at the bottom of every page unless overridden
pub const DEFAULT_FOOTER_TEXT: &str = "© 2025 | SafetyNow is a Property of Bongarde Media | \
     All rights reserved | https://ilt.safetynow.com/ | 1.800.667.9300";

const PAGE_MARGIN: Pt = Pt(72.0);
const LOGO_MAX_WIDTH: Pt = Pt(180.0);
const LOGO_TOP_OFFSET: Pt = Pt(24.0);
const TITLE_TOP_OFFSET: Pt = Pt(120.0);
/// Gap between the bottom of the title and the first body block
const CHROME_GAP: Pt = Pt(16.0);
/// Distance from the page bottom edge to the bottom of the footer text
const FOOTER_BOTTOM_OFFSET: Pt = Pt(24.0);
/// Padding added above the footer text to form the reserved footer band
const FOOTER_BAND_PADDING: Pt = Pt(32.0);

/// Static configuration for a [Renderer]. The defaults reproduce the
/// production talk-sheet appearance; tests and embedders override pieces.
pub struct RendererConfig {
    /// Drawn centered at the bottom of every page
    pub footer_text: String,
    /// Written into the PDF info dictionary
    pub author: String,
    /// Optional first-page logo. When absent the title chrome renders with
    /// no layout penalty.
    pub logo: Option<Image>,
    /// Where artifacts are persisted
    pub output_dir: PathBuf,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            footer_text: DEFAULT_FOOTER_TEXT.to_string(),
            author: "SafetyNow".to_string(),
            logo: None,
            output_dir: std::env::temp_dir(),
        }
    }
}

/// Renders talk documents into paginated PDF artifacts.
///
/// A renderer is cheap to construct and safe to share across threads; each
/// [render](Renderer::render) call is fully synchronous and self-contained,
/// so concurrent calls need no coordination; artifact names are unique per
/// call by construction.
pub struct Renderer<M = AfmMetrics, I = RandomIds> {
    config: RendererConfig,
    metrics: M,
    ids: I,
}

impl Renderer {
    /// A renderer with the built-in AFM metrics, random artifact ids, and
    /// default configuration
    pub fn new() -> Renderer {
        Self::with_config(RendererConfig::default())
    }

    pub fn with_config(config: RendererConfig) -> Renderer {
        Renderer {
            config,
            metrics: AfmMetrics,
            ids: RandomIds,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: FontMetrics, I: ArtifactIds> Renderer<M, I> {
    /// A renderer with explicit collaborators, for embedders and tests that
    /// need deterministic measurement or artifact naming
    pub fn with_parts(config: RendererConfig, metrics: M, ids: I) -> Renderer<M, I> {
        Renderer {
            config,
            metrics,
            ids,
        }
    }

    /// Lay out a document without serializing it. The returned [Document]
    /// exposes its pages and draw operations for inspection; rendering the
    /// same request twice yields the same layout.
    pub fn compose(&self, title: &str, body: Option<&str>) -> Result<Document, RenderError> {
        let geom = self.geometry();
        let styles = FlowStyles {
            heading: HEADING_FONT,
            body: BODY_FONT,
            colour: colours::BLACK,
        };

        let mut doc = Document::new();
        doc.set_info(
            Info::new()
                .title(title)
                .author(self.config.author.as_str())
                .clone(),
        );

        let logo = self
            .config
            .logo
            .as_ref()
            .map(|img| (self.logo_placement(img, &geom), img.clone()))
            .map(|(rect, img)| (doc.add_image(img), rect));

        let mut pages = vec![Page::new(geom.size, geom.margins.clone())];
        let first = pages.last_mut().expect("page 1 was just opened");
        self.draw_footer(first, &geom);
        let start_y = self.draw_first_page_chrome(first, title, logo, &geom)?;

        let lines = body.map(classify).unwrap_or_default();
        flow_lines(
            &lines,
            &self.metrics,
            &geom,
            &styles,
            start_y,
            &mut pages,
            || {
                let mut page = Page::new(geom.size, geom.margins.clone());
                self.draw_footer(&mut page, &geom);
                page
            },
        )?;

        debug!("composed {} page(s) for {title:?}", pages.len());
        for page in pages {
            doc.add_page(page);
        }
        Ok(doc)
    }

    /// Render a talk to a finished PDF artifact on disk. On error no file
    /// is left at the artifact path; the caller decides the fallback.
    pub fn render(&self, title: &str, body: Option<&str>) -> Result<Artifact, RenderError> {
        let doc = self.compose(title, body)?;
        let mut bytes: Vec<u8> = Vec::new();
        doc.write(&mut bytes)?;
        write_artifact(&self.config.output_dir, "talk", &self.ids.next_id(), &bytes)
    }

    /// The fixed page geometry. The body floor is the footer band (offset +
    /// footer height + padding) but never drops below the bottom margin;
    /// with the default footer the margin governs.
    fn geometry(&self) -> PageGeometry {
        let footer_band =
            FOOTER_BOTTOM_OFFSET + self.metrics.line_height(FOOTER_FONT) + FOOTER_BAND_PADDING;
        PageGeometry {
            size: LETTER,
            margins: Margins::all(PAGE_MARGIN),
            floor: footer_band.max(PAGE_MARGIN),
        }
    }

    /// The footer is drawn the moment a page is opened; it is part of every
    /// page's chrome, first page included.
    fn draw_footer(&self, page: &mut Page, geom: &PageGeometry) {
        let text = self.config.footer_text.as_str();
        let width = self.metrics.width_of(text, FOOTER_FONT);
        let line_height = self.metrics.line_height(FOOTER_FONT);
        let baseline = FOOTER_BOTTOM_OFFSET + line_height - self.metrics.ascent(FOOTER_FONT);
        page.add_span(SpanLayout {
            text: text.to_string(),
            font: FOOTER_FONT,
            colour: colours::FOOTER_GREY,
            coords: ((geom.size.0 - width) / 2.0, baseline),
        });
    }

    /// Scale the logo to its placement box: capped width, aspect preserved,
    /// centered at a fixed offset from the top edge
    fn logo_placement(&self, logo: &Image, geom: &PageGeometry) -> Rect {
        let width = if Pt(logo.width) > LOGO_MAX_WIDTH {
            LOGO_MAX_WIDTH
        } else {
            Pt(logo.width)
        };
        let height = width * logo.aspect();
        let x1 = (geom.size.0 - width) / 2.0;
        let y2 = geom.size.1 - LOGO_TOP_OFFSET;
        Rect {
            x1,
            y1: y2 - height,
            x2: x1 + width,
            y2,
        }
    }

    /// Draw the first-page chrome (logo and wrapped title) and return the
    /// cursor position for the first body block
    fn draw_first_page_chrome(
        &self,
        page: &mut Page,
        title: &str,
        logo: Option<(Id<Image>, Rect)>,
        geom: &PageGeometry,
    ) -> Result<Pt, RenderError> {
        let mut title_top = geom.size.1 - TITLE_TOP_OFFSET;

        if let Some((image, position)) = logo {
            // a tall logo pushes the title down rather than overlapping it
            if position.y1 - CHROME_GAP < title_top {
                title_top = position.y1 - CHROME_GAP;
            }
            page.add_image(ImageLayout { image, position });
        }

        checked_measure(&self.metrics, title, TITLE_FONT, geom)?;
        let height = place_block(
            std::slice::from_mut(page),
            &self.metrics,
            title,
            TITLE_FONT,
            colours::BLACK,
            title_top,
            geom,
        )?;

        Ok(title_top - height - CHROME_GAP)
    }
}
