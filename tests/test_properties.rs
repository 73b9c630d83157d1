//! Property tests for the pipeline invariants.
//!
//! - Partition: clustering never duplicates or drops a non-blank fragment.
//! - Idempotence: the pipeline is a pure function of its input.
//! - Summary consistency: counts always agree with the collections.

use proptest::prelude::*;

use drawing_oxide::config::{ClusteringConfig, ExtractionConfig};
use drawing_oxide::fragment::{Fragment, PageContent};
use drawing_oxide::geometry::{BoundingBox, Point};
use drawing_oxide::layout::TextClusterer;
use drawing_oxide::pipeline::ExtractionPipeline;

fn arb_fragment() -> impl Strategy<Value = Fragment> {
    (
        "[A-Za-z0-9 ]{0,8}",
        0.0f32..1000.0,
        0.0f32..800.0,
        1.0f32..60.0,
        6.0f32..18.0,
    )
        .prop_map(|(text, x, y, width, size)| Fragment {
            text,
            origin: Point::new(x, y),
            bbox: BoundingBox::new(x, y, x + width, y + size),
            font: "Arial".to_string(),
            size,
            page: 1,
            rotation: 0,
        })
}

fn arb_page(fragments: Vec<Fragment>) -> PageContent {
    PageContent {
        index: 1,
        width: 1190.0,
        height: 842.0,
        rotation: 0,
        fragments,
    }
}

proptest! {
    #[test]
    fn partition_property(fragments in proptest::collection::vec(arb_fragment(), 0..40)) {
        let clusterer = TextClusterer::new(ClusteringConfig::default()).unwrap();
        let elements = clusterer.cluster_page(&fragments);

        // Every non-blank fragment lands in exactly one element: constituent
        // counts account for each exactly once.
        let non_blank = fragments.iter().filter(|f| !f.text.trim().is_empty()).count();
        let accounted: usize = elements.iter().map(|e| e.fragment_count).sum();
        prop_assert_eq!(accounted, non_blank);

        // And every non-blank fragment's box is contained in some element's
        // merged box.
        for fragment in fragments.iter().filter(|f| !f.text.trim().is_empty()) {
            prop_assert!(elements.iter().any(|e| e.bbox.contains(&fragment.bbox)));
        }
    }

    #[test]
    fn pipeline_idempotent(fragments in proptest::collection::vec(arb_fragment(), 0..30)) {
        let pages = vec![arb_page(fragments)];
        let pipeline = ExtractionPipeline::new().unwrap();

        let first = pipeline.extract(&pages);
        let second = pipeline.extract(&pages);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn summary_consistent(fragments in proptest::collection::vec(arb_fragment(), 0..30)) {
        let pages = vec![arb_page(fragments)];
        let result = ExtractionPipeline::with_config(ExtractionConfig::default())
            .unwrap()
            .extract(&pages);

        prop_assert_eq!(result.summary.total_markers, result.markers.len());

        let mut expected_types: Vec<String> = result.markers.keys().cloned().collect();
        expected_types.sort();
        prop_assert_eq!(&result.summary.marker_types, &expected_types);

        let per_page: usize = result.pages.iter().map(|p| p.elements.len()).sum();
        prop_assert_eq!(result.summary.total_text_elements, per_page);
        prop_assert_eq!(result.summary.total_text_elements, result.all_text_elements.len());
    }
}
