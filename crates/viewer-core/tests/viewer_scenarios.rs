use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pdf_viewer_core::source::scaled_dimensions;
use pdf_viewer_core::{
    DisplayList, Document, DocumentSource, LoadOutcome, PageBitmap, Point, Rect, SourceError,
    TextSpan, Viewer, ViewerConfig, ViewerError,
};

/// In-memory documents keyed by path; every page is US Letter.
#[derive(Default)]
struct FixtureSource {
    documents: HashMap<PathBuf, Vec<Vec<TextSpan>>>,
}

impl FixtureSource {
    fn with(mut self, path: &str, pages: usize) -> Self {
        let spans = (0..pages)
            .map(|page| {
                vec![
                    TextSpan::new(Rect::new(72.0, 72.0, 120.0, 14.0), format!("Heading {}", page + 1)),
                    TextSpan::new(Rect::new(72.0, 700.0, 30.0, 10.0), format!("{}", page + 1)),
                ]
            })
            .collect();
        self.documents.insert(PathBuf::from(path), spans);
        self
    }
}

struct FixtureDocument {
    pages: Vec<Vec<TextSpan>>,
}

impl DocumentSource for FixtureSource {
    type Document = FixtureDocument;

    fn open(&self, path: &Path) -> Result<FixtureDocument, SourceError> {
        self.documents
            .get(path)
            .map(|pages| FixtureDocument { pages: pages.clone() })
            .ok_or_else(|| SourceError::Open {
                path: path.to_path_buf(),
                reason: "not a PDF file".to_owned(),
            })
    }
}

impl Document for FixtureDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn rasterize(&self, page_index: usize, scale: f32) -> Result<PageBitmap, SourceError> {
        if page_index >= self.pages.len() {
            return Err(SourceError::PageOutOfRange { page: page_index, page_count: self.pages.len() });
        }
        let (width, height) = scaled_dimensions(612.0, 792.0, scale);
        Ok(PageBitmap::from_pixel(width, height, image::Rgb([255, 255, 255])))
    }

    fn text_spans(&self, page_index: usize) -> Result<Vec<TextSpan>, SourceError> {
        self.pages.get(page_index).cloned().ok_or(SourceError::PageOutOfRange {
            page: page_index,
            page_count: self.pages.len(),
        })
    }
}

fn viewer(source: FixtureSource) -> Viewer<FixtureSource> {
    Viewer::new(source, &ViewerConfig::default())
}

fn load(viewer: &mut Viewer<FixtureSource>, surface: &mut DisplayList, path: &str) -> usize {
    match viewer.load(Some(Path::new(path)), surface).expect("load should succeed") {
        LoadOutcome::Loaded { page_count } => page_count,
        LoadOutcome::Cancelled => panic!("load of {path} was treated as cancelled"),
    }
}

#[test]
fn loading_n_pages_builds_n_bitmaps_and_starts_on_page_one() {
    let mut viewer = viewer(FixtureSource::default().with("five.pdf", 5));
    let mut surface = DisplayList::new();

    assert_eq!(load(&mut viewer, &mut surface, "five.pdf"), 5);

    assert_eq!(viewer.page_count(), 5);
    assert!((0..5).all(|page| viewer.page_bitmap(page).is_some()));
    assert!(viewer.page_bitmap(5).is_none());
    assert_eq!(viewer.page_indicator(), "Page 1 / 5");
}

#[test]
fn navigation_is_clamped_and_idempotent_at_both_ends() {
    let mut viewer = viewer(FixtureSource::default().with("three.pdf", 3));
    let mut surface = DisplayList::new();
    load(&mut viewer, &mut surface, "three.pdf");

    for _ in 0..3 {
        assert!(!viewer.previous_page(&mut surface));
        assert_eq!(viewer.current_page(), 0);
    }

    assert!(viewer.next_page(&mut surface));
    assert!(viewer.next_page(&mut surface));
    for _ in 0..3 {
        assert!(!viewer.next_page(&mut surface));
        assert_eq!(viewer.current_page(), 2);
    }
    assert_eq!(viewer.page_indicator(), "Page 3 / 3");
}

#[test]
fn reload_keeps_the_page_index_when_it_fits() {
    let source = FixtureSource::default().with("long.pdf", 6).with("medium.pdf", 4);
    let mut viewer = viewer(source);
    let mut surface = DisplayList::new();
    load(&mut viewer, &mut surface, "long.pdf");
    for _ in 0..3 {
        viewer.next_page(&mut surface);
    }

    load(&mut viewer, &mut surface, "medium.pdf");

    assert_eq!(viewer.current_page(), 3);
    assert_eq!(viewer.page_indicator(), "Page 4 / 4");
    assert_eq!(viewer.document_path(), Some(Path::new("medium.pdf")));
}

#[test]
fn reload_clamps_the_page_index_into_a_shorter_document() {
    let source = FixtureSource::default().with("long.pdf", 6).with("short.pdf", 2);
    let mut viewer = viewer(source);
    let mut surface = DisplayList::new();
    load(&mut viewer, &mut surface, "long.pdf");
    for _ in 0..5 {
        viewer.next_page(&mut surface);
    }

    load(&mut viewer, &mut surface, "short.pdf");

    assert_eq!(viewer.current_page(), 1);
    assert_eq!(viewer.page_indicator(), "Page 2 / 2");
}

#[test]
fn bitmap_dimensions_scale_with_zoom() {
    let mut viewer = viewer(FixtureSource::default().with("one.pdf", 1));
    let mut surface = DisplayList::new();
    load(&mut viewer, &mut surface, "one.pdf");
    let base = viewer.page_bitmap(0).expect("page should be rasterized").dimensions();

    // 1.1^8 is just above 2.0
    for _ in 0..8 {
        viewer.zoom_in(&mut surface).expect("zoom should succeed");
    }
    let zoom = viewer.zoom_factor();
    let zoomed = viewer.page_bitmap(0).expect("page should be rasterized").dimensions();

    let expected_width = base.0 as f32 * zoom;
    assert!((zoomed.0 as f32 - expected_width).abs() <= 1.0);
    assert!(zoomed.0 > 2 * base.0);
}

#[test]
fn overlay_positions_scale_with_zoom_and_shift_by_origin() {
    let mut viewer = viewer(FixtureSource::default().with("one.pdf", 1));
    let mut surface = DisplayList::new();
    load(&mut viewer, &mut surface, "one.pdf");
    viewer.zoom_in(&mut surface).expect("zoom should succeed");
    viewer.zoom_in(&mut surface).expect("zoom should succeed");
    let zoom = viewer.zoom_factor();

    let placed: Vec<_> = surface.texts().map(|(origin, text)| (origin, text.to_owned())).collect();

    assert_eq!(placed.len(), 2);
    let (heading, text) = &placed[0];
    assert_eq!(text, "Heading 1");
    assert!((heading.x - (72.0 * zoom + 50.0)).abs() < 1e-3);
    assert!((heading.y - (72.0 * zoom + 50.0)).abs() < 1e-3);

    let (image, origin) = surface.image().expect("page image should be drawn");
    assert_eq!(origin, Point::new(50.0, 50.0));
    let extent = surface.scroll_extent().expect("extent should be set");
    assert_eq!(extent, image.rect_at(origin));
}

#[test]
fn custom_viewport_origin_is_honoured() {
    let config = ViewerConfig { viewport_origin: Point::new(10.0, 20.0), ..ViewerConfig::default() };
    let mut viewer = Viewer::new(FixtureSource::default().with("one.pdf", 1), &config);
    let mut surface = DisplayList::new();
    load(&mut viewer, &mut surface, "one.pdf");

    let (_, origin) = surface.image().expect("page image should be drawn");
    let (first, _) = surface.texts().next().expect("overlay text should be drawn");

    assert_eq!(origin, Point::new(10.0, 20.0));
    assert_eq!(first, Point::new(82.0, 92.0));
}

#[test]
fn invalid_file_surfaces_an_error_without_touching_state() {
    let mut viewer = viewer(FixtureSource::default());
    let mut surface = DisplayList::new();

    let err = viewer
        .load(Some(Path::new("corrupt.pdf")), &mut surface)
        .expect_err("unknown file should fail");

    assert!(matches!(err, ViewerError::Source(SourceError::Open { .. })));
    assert!(err.to_string().contains("corrupt.pdf"));
    assert!(!viewer.is_loaded());
    assert!(surface.is_empty());
}

#[test]
fn three_page_walkthrough() {
    let mut viewer = viewer(FixtureSource::default().with("three.pdf", 3));
    let mut surface = DisplayList::new();

    load(&mut viewer, &mut surface, "three.pdf");
    assert_eq!(viewer.zoom_factor(), 1.0);
    assert_eq!(viewer.page_indicator(), "Page 1 / 3");

    viewer.next_page(&mut surface);
    viewer.next_page(&mut surface);
    assert_eq!(viewer.page_indicator(), "Page 3 / 3");

    assert!(!viewer.next_page(&mut surface));
    assert_eq!(viewer.page_indicator(), "Page 3 / 3");

    let (before, _) = surface.image().expect("page image should be drawn");
    assert!(viewer.zoom_in(&mut surface).expect("zoom should succeed"));
    let (after, _) = surface.image().expect("page image should be drawn");

    assert_eq!(viewer.page_count(), 3);
    assert_eq!(viewer.page_indicator(), "Page 3 / 3");
    assert_eq!(after.page_index, 2);
    assert!(after.width > before.width);
    assert!(after.height > before.height);
    assert!(after.generation > before.generation);
}
