//! Integration tests for the full extraction pipeline.
//!
//! These tests drive the pipeline with mock fragment data simulating
//! realistic CAD-exported drawing sheets.

use drawing_oxide::config::{ExtractionConfig, TitleBlockPolicy};
use drawing_oxide::fragment::{Fragment, PageContent};
use drawing_oxide::geometry::{BoundingBox, Point};
use drawing_oxide::layout::ElementKind;
use drawing_oxide::pipeline::ExtractionPipeline;
use drawing_oxide::title_block::SheetIndex;

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

/// Create a mock fragment at a position, sized for a 10pt font.
fn fragment(text: &str, x0: f32, y: f32, x1: f32, page: u32) -> Fragment {
    Fragment {
        text: text.to_string(),
        origin: Point::new(x0, y),
        bbox: BoundingBox::new(x0, y, x1, y + 10.0),
        font: "Arial".to_string(),
        size: 10.0,
        page,
        rotation: 0,
    }
}

/// Wrap fragments into an A1-landscape-ish page.
fn page(index: u32, fragments: Vec<Fragment>) -> PageContent {
    PageContent {
        index,
        width: 1190.0,
        height: 842.0,
        rotation: 0,
        fragments,
    }
}

fn pipeline() -> ExtractionPipeline {
    ExtractionPipeline::new().unwrap()
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[test]
fn test_end_to_end_scenario() {
    // "BASE" and "PLATE" sit within the merge gap on one line; "BP1" stands
    // alone elsewhere on the sheet.
    let pages = vec![page(
        1,
        vec![
            fragment("BASE", 150.0, 100.0, 174.0, 1),
            fragment("PLATE", 180.0, 100.0, 210.0, 1),
            fragment("BP1", 300.0, 400.0, 318.0, 1),
        ],
    )];

    let result = pipeline().extract(&pages);

    // marker mapping
    assert_eq!(result.markers.len(), 1);
    let occurrences = &result.markers["BP1"];
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].x, 300.0);
    assert_eq!(occurrences[0].y, 400.0);
    assert_eq!(occurrences[0].page, 1);

    // text elements: one merged label, one marker
    assert_eq!(result.all_text_elements.len(), 2);
    let merged = result
        .all_text_elements
        .iter()
        .find(|e| e.text == "BASE PLATE")
        .expect("merged BASE PLATE element");
    assert_eq!(merged.kind, ElementKind::Text);
    assert_eq!(merged.fragment_count, 2);
    let marker = result
        .all_text_elements
        .iter()
        .find(|e| e.text == "BP1")
        .expect("BP1 marker element");
    assert_eq!(marker.kind, ElementKind::Marker);

    // summary
    assert_eq!(result.summary.total_pages, 1);
    assert_eq!(result.summary.total_markers, 1);
    assert_eq!(result.summary.total_text_elements, 2);
    assert_eq!(result.summary.marker_types, vec!["BP1"]);
}

#[test]
fn test_split_marker_reconstructed_before_detection() {
    // A marker split by the CAD export into "B" + "P1" must be detected
    // after clustering, not missed.
    let pages = vec![page(
        1,
        vec![
            fragment("B", 300.0, 400.0, 305.0, 1),
            fragment("P1", 305.5, 400.0, 318.0, 1),
        ],
    )];

    let result = pipeline().extract(&pages);
    assert!(result.markers.contains_key("BP1"));
}

// ============================================================================
// Marker Semantics
// ============================================================================

#[test]
fn test_prose_is_never_a_marker() {
    let pages = vec![page(
        1,
        vec![
            fragment("SPECIFICATION NOTES", 100.0, 100.0, 214.0, 1),
            fragment("SC", 500.0, 100.0, 512.0, 1),
        ],
    )];

    let result = pipeline().extract(&pages);
    // "SC" is a bare discipline code; "SPECIFICATION NOTES" must not be
    // classified as "SC" or "C".
    assert_eq!(result.summary.marker_types, vec!["SC"]);
    assert_eq!(result.markers["SC"].len(), 1);
    assert_eq!(result.markers["SC"][0].x, 500.0);
}

#[test]
fn test_occurrences_ordered_pages_ascending() {
    let pages = vec![
        page(2, vec![fragment("C-1", 100.0, 100.0, 118.0, 2)]),
        page(1, vec![fragment("C-1", 700.0, 300.0, 718.0, 1)]),
    ];

    let result = pipeline().extract(&pages);
    let order: Vec<u32> = result.markers["C-1"].iter().map(|o| o.page).collect();
    assert_eq!(order, vec![1, 2]);
}

#[test]
fn test_dedup_absorbs_near_duplicate_labels_only() {
    // A duplicate rendering sits a few points off the original (a different
    // baseline band, so clustering keeps it separate); a third instance
    // lives elsewhere on the sheet and must survive.
    let mut config = ExtractionConfig::default();
    config.detection.dedup_radius = 5.0;
    let pages = vec![page(
        1,
        vec![
            fragment("SC1", 100.0, 200.0, 118.0, 1),
            fragment("SC1", 100.3, 203.0, 118.3, 1),
            fragment("SC1", 600.0, 200.0, 618.0, 1),
        ],
    )];

    let result = ExtractionPipeline::with_config(config).unwrap().extract(&pages);
    assert_eq!(result.markers["SC1"].len(), 2);
    // the first rendering won
    assert_eq!(result.markers["SC1"][0].y, 200.0);
}

// ============================================================================
// Title Block
// ============================================================================

#[test]
fn test_title_block_recovered_from_bottom_band() {
    let pages = vec![page(
        1,
        vec![
            fragment("FOUNDATION PLAN", 400.0, 60.0, 490.0, 1),
            fragment("DWG NO. S-101", 900.0, 800.0, 978.0, 1),
            fragment("SCALE 1:100", 800.0, 820.0, 866.0, 1),
            fragment("12/03/2024", 700.0, 820.0, 760.0, 1),
            fragment("SHEET 1 OF 4", 600.0, 820.0, 672.0, 1),
        ],
    )];

    let result = pipeline().extract(&pages);
    assert_eq!(result.drawing_info.drawing_number.as_deref(), Some("S-101"));
    assert_eq!(result.drawing_info.scale.as_deref(), Some("1:100"));
    assert_eq!(result.drawing_info.date.as_deref(), Some("12/03/2024"));
    assert_eq!(result.drawing_info.sheet, Some(SheetIndex { number: 1, total: 4 }));
    assert!(result.drawing_info.revision.is_none());
}

#[test]
fn test_title_block_policy_is_a_configuration_choice() {
    let pages = vec![
        page(1, vec![fragment("GENERAL NOTES", 100.0, 100.0, 178.0, 1)]),
        page(2, vec![fragment("REVISION: C", 900.0, 800.0, 966.0, 2)]),
    ];

    let first_page_only = pipeline().extract(&pages);
    assert!(first_page_only.drawing_info.revision.is_none());

    let mut config = ExtractionConfig::default();
    config.title_block.policy = TitleBlockPolicy::MergeAllPages;
    let merged = ExtractionPipeline::with_config(config).unwrap().extract(&pages);
    assert_eq!(merged.drawing_info.revision.as_deref(), Some("C"));
}

// ============================================================================
// Failure Isolation
// ============================================================================

#[test]
fn test_empty_document() {
    let result = pipeline().extract(&[]);
    assert_eq!(result.summary.total_pages, 0);
    assert!(result.markers.is_empty());
    assert!(result.all_text_elements.is_empty());
    assert!(result.drawing_info.is_empty());
}

#[test]
fn test_page_without_markers_is_valid() {
    let pages = vec![page(1, vec![fragment("GENERAL NOTES", 100.0, 100.0, 178.0, 1)])];
    let result = pipeline().extract(&pages);
    assert_eq!(result.summary.total_markers, 0);
    assert_eq!(result.summary.total_text_elements, 1);
    assert!(result.summary.marker_types.is_empty());
}

#[test]
fn test_malformed_page_flagged_not_omitted() {
    let mut bad = fragment("RW1", 100.0, 100.0, 118.0, 2);
    bad.bbox = BoundingBox::new(118.0, 100.0, 100.0, 110.0);
    let pages = vec![
        page(1, vec![fragment("RW2", 100.0, 100.0, 118.0, 1)]),
        page(2, vec![bad]),
    ];

    let result = pipeline().extract(&pages);
    assert_eq!(result.metadata.len(), 2);
    assert!(result.metadata[1].extraction_failed);
    assert_eq!(result.summary.marker_types, vec!["RW2"]);
    // dropped page still appears in the breakdown, with no elements
    assert_eq!(result.pages[1].page, 2);
    assert!(result.pages[1].elements.is_empty());
}

// ============================================================================
// Wire Shape
// ============================================================================

#[test]
fn test_serialized_result_shape() {
    let pages = vec![page(1, vec![fragment("BP1", 300.0, 400.0, 318.0, 1)])];
    let result = pipeline().extract(&pages);
    let json = serde_json::to_value(&result).unwrap();

    for key in [
        "metadata",
        "pages",
        "markers",
        "all_text_elements",
        "drawing_info",
        "summary",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }

    let element = &json["all_text_elements"][0];
    assert_eq!(element["text"], "BP1");
    assert_eq!(element["type"], "marker");
    assert_eq!(element["x"], 300.0);
    assert_eq!(element["bbox"], serde_json::json!([300.0, 400.0, 318.0, 410.0]));

    let occurrence = &json["markers"]["BP1"][0];
    assert_eq!(occurrence["x"], 300.0);
    assert_eq!(occurrence["y"], 400.0);
    assert_eq!(occurrence["page"], 1);

    assert_eq!(json["summary"]["total_markers"], 1);
}
