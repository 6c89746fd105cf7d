//! End-to-end tests over the public renderer API: page counts, per-page
//! chrome, pagination behaviour, and artifact handling.

use talksheet::{
    Artifact, ArtifactIds, Image, PageContents, Renderer, RendererConfig, BODY_FONT, FOOTER_FONT,
    TITLE_FONT,
};

fn body_texts(page: &talksheet::Page) -> Vec<String> {
    page.contents
        .iter()
        .filter_map(|c| match c {
            PageContents::Text(span) if span.font == BODY_FONT => Some(span.text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_body_still_renders_one_page_of_chrome() {
    let doc = Renderer::new().compose("Fire Safety", None).unwrap();
    assert_eq!(doc.page_count(), 1);

    let page = doc.ordered_pages().next().unwrap();
    let title_spans: Vec<_> = page
        .contents
        .iter()
        .filter_map(|c| match c {
            PageContents::Text(span) if span.font == TITLE_FONT => Some(span.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(title_spans, vec!["Fire Safety"]);
    assert!(body_texts(page).is_empty());
}

#[test]
fn absent_and_empty_bodies_lay_out_identically() {
    let renderer = Renderer::new();
    let absent = renderer.compose("Ladder Checks", None).unwrap();
    let empty = renderer.compose("Ladder Checks", Some("")).unwrap();
    assert_eq!(absent.page_count(), empty.page_count());
}

#[test]
fn short_structured_body_fits_one_page() {
    let body = "HAZARDS\nWatch your step.\n\nSTAY ALERT\nFollow procedure.";
    let doc = Renderer::new().compose("Slips and Trips", Some(body)).unwrap();
    assert_eq!(doc.page_count(), 1);

    let page = doc.ordered_pages().next().unwrap();
    let texts = page.span_texts();
    for expected in ["HAZARDS", "Watch your step.", "STAY ALERT", "Follow procedure."] {
        assert!(texts.contains(&expected), "missing {expected:?}");
    }
}

#[test]
fn long_body_flows_across_pages_without_loss() {
    // one short paragraph line per sentence; each stays a single wrapped line
    let lines: Vec<String> = (1..=80).map(|i| format!("Inspect item number {i}.")).collect();
    let body = lines.join("\n");
    let doc = Renderer::new().compose("Pre-Start Inspection", Some(&body)).unwrap();
    assert!(doc.page_count() > 1, "80 paragraphs must overflow page 1");

    let mut seen: Vec<String> = Vec::new();
    for page in doc.ordered_pages() {
        seen.extend(body_texts(page));
    }
    assert_eq!(seen, lines, "no line may be dropped, duplicated, or reordered");
}

/// A deterministic many-paragraph body, long enough to span several pages
fn long_body(paragraphs: usize) -> String {
    std::iter::repeat(lipsum::lipsum(12))
        .take(paragraphs)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn footer_appears_unchanged_on_every_page() {
    let body = long_body(60);
    let doc = Renderer::new().compose("Housekeeping", Some(&body)).unwrap();
    assert!(doc.page_count() > 1);

    for page in doc.ordered_pages() {
        let footers: Vec<_> = page
            .contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(span) if span.font == FOOTER_FONT => Some(span.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(footers.len(), 1, "exactly one footer per page");
        assert!(footers[0].contains("Bongarde"));
    }
}

#[test]
fn title_and_logo_appear_only_on_the_first_page() {
    let mut config = RendererConfig::default();
    config.logo = Some(Image::new(image::DynamicImage::new_rgb8(300, 100)));
    let body = long_body(60);
    let doc = Renderer::with_config(config).compose("Noise Exposure", Some(&body)).unwrap();
    assert!(doc.page_count() > 1);

    for (index, page) in doc.ordered_pages().enumerate() {
        let has_title = page
            .contents
            .iter()
            .any(|c| matches!(c, PageContents::Text(span) if span.font == TITLE_FONT));
        let has_image = page
            .contents
            .iter()
            .any(|c| matches!(c, PageContents::Image(_)));
        if index == 0 {
            assert!(has_title && has_image);
        } else {
            assert!(!has_title, "title leaked onto page {}", index + 1);
            assert!(!has_image, "logo leaked onto page {}", index + 1);
        }
    }
}

#[test]
fn composing_twice_yields_identical_layout() {
    let renderer = Renderer::new();
    let body = long_body(40);
    let a = renderer.compose("Repeatability", Some(&body)).unwrap();
    let b = renderer.compose("Repeatability", Some(&body)).unwrap();
    assert_eq!(a.page_count(), b.page_count());
    for (pa, pb) in a.ordered_pages().zip(b.ordered_pages()) {
        assert_eq!(pa.contents.len(), pb.contents.len());
        for (ca, cb) in pa.contents.iter().zip(pb.contents.iter()) {
            assert_eq!(ca, cb);
        }
    }
}

#[test]
fn render_produces_a_readable_pdf_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = RendererConfig::default();
    config.output_dir = dir.path().to_path_buf();
    let renderer = Renderer::with_config(config);

    let artifact = renderer
        .render("Fire Safety", Some("HAZARDS\nKeep exits clear."))
        .unwrap();
    assert!(artifact.path.starts_with(dir.path()));
    let bytes = std::fs::read(&artifact.path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    // no stray partial files
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().map(|x| x == "part").unwrap_or(false))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn render_failure_reports_an_error_and_leaves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not-created");
    let mut config = RendererConfig::default();
    config.output_dir = missing.clone();
    let renderer = Renderer::with_config(config);

    let result = renderer.render("Fire Safety", None);
    assert!(result.is_err());
    assert!(!missing.exists());
}

#[test]
fn concurrent_renders_produce_distinct_uncorrupted_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_path_buf();

    let spawn = |title: &'static str, body: &'static str| {
        let output_dir = path.clone();
        std::thread::spawn(move || {
            let mut config = RendererConfig::default();
            config.output_dir = output_dir;
            Renderer::with_config(config)
                .render(title, Some(body))
                .unwrap()
        })
    };

    let a = spawn("Forklift Basics", "CHECKS\nWalk around the vehicle.");
    let b = spawn("Eye Protection", "FIT\nAdjust the strap snugly.");
    let a: Artifact = a.join().unwrap();
    let b: Artifact = b.join().unwrap();

    assert_ne!(a.path, b.path);
    for artifact in [a, b] {
        let bytes = std::fs::read(&artifact.path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}

#[test]
fn injected_id_generator_pins_the_artifact_name() {
    struct FixedIds;
    impl ArtifactIds for FixedIds {
        fn next_id(&self) -> String {
            "fixed0001".to_string()
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let mut config = RendererConfig::default();
    config.output_dir = dir.path().to_path_buf();
    let renderer = Renderer::with_parts(config, talksheet::AfmMetrics, FixedIds);

    let artifact = renderer.render("Pinned", None).unwrap();
    assert_eq!(artifact.path, dir.path().join("talk-fixed0001.pdf"));
}
