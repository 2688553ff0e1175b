use aws_sdk_s3::operation::list_object_versions::ListObjectVersionsOutput;
use aws_sdk_s3::types::{DeleteMarkerEntry, ObjectVersion};

use super::types::{NameFilter, PurgeTotals};
use super::wrapper::page_identifiers;

#[test]
fn filter_ignores_case() {
    let filter = NameFilter::parse("Scratch").unwrap();

    assert!(filter.matches("scratch-2024"));
    assert!(filter.matches("team-SCRATCH"));
    assert!(filter.matches("my-sCrAtCh-data"));
    assert!(!filter.matches("permanent-data"));
}

#[test]
fn filter_matches_anywhere_in_the_name() {
    let filter = NameFilter::parse("test").unwrap();

    assert!(filter.matches("test-bucket"));
    assert!(filter.matches("bucket-test"));
    assert!(filter.matches("some-test-bucket"));
    assert!(!filter.matches("tes-t"));
}

#[test]
fn filter_treats_input_as_text_not_regex() {
    let filter = NameFilter::parse("data.2024").unwrap();

    assert!(filter.matches("data.2024-eu"));
    assert!(!filter.matches("datax2024-eu"));
}

#[test]
fn filter_trims_and_rejects_blank_input() {
    assert_eq!(NameFilter::parse("  nightly ").unwrap().to_string(), "nightly");

    assert!(NameFilter::parse("").is_err());
    assert!(NameFilter::parse("   ").is_err());
}

#[test]
fn identifiers_cover_versions_and_delete_markers() {
    let page = ListObjectVersionsOutput::builder()
        .versions(
            ObjectVersion::builder()
                .key("a.txt")
                .version_id("v1")
                .size(10)
                .build(),
        )
        .versions(
            ObjectVersion::builder()
                .key("a.txt")
                .version_id("v2")
                .size(32)
                .build(),
        )
        .delete_markers(
            DeleteMarkerEntry::builder()
                .key("b.txt")
                .version_id("m1")
                .build(),
        )
        .build();

    let (identifiers, totals) = page_identifiers(page).unwrap();

    assert_eq!(identifiers.len(), 3);
    assert_eq!(
        totals,
        PurgeTotals {
            versions: 2,
            delete_markers: 1,
            bytes: 42,
        }
    );

    let mut pairs: Vec<(&str, Option<&str>)> = identifiers
        .iter()
        .map(|id| (id.key(), id.version_id()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("a.txt", Some("v1")),
            ("a.txt", Some("v2")),
            ("b.txt", Some("m1")),
        ]
    );
}

#[test]
fn empty_page_yields_no_identifiers() {
    let page = ListObjectVersionsOutput::builder().build();

    let (identifiers, totals) = page_identifiers(page).unwrap();

    assert!(identifiers.is_empty());
    assert_eq!(totals, PurgeTotals::default());
}

#[test]
fn totals_accumulate_across_buckets() {
    let a = PurgeTotals {
        versions: 5,
        delete_markers: 2,
        bytes: 100,
    };
    let b = PurgeTotals {
        versions: 1,
        delete_markers: 0,
        bytes: 900,
    };

    assert_eq!(
        a + b,
        PurgeTotals {
            versions: 6,
            delete_markers: 2,
            bytes: 1000,
        }
    );
}
