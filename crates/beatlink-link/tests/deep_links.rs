//! End-to-end share-link behavior: generate, parse, resolve, hold.

use std::time::Duration;

use beatlink_link::{
    LinkBuilder, LinkConfig, PendingLinkStore, ShareOptions, generate_share_url,
    open_deep_link, parse_deep_link, parse_viewer_url,
};
use beatlink_protocol::{COMPRESSED_PREFIX, SequenceData, decode, encode};

// =========================================================================
// Helpers
// =========================================================================

fn builder() -> LinkBuilder {
    LinkBuilder::new(&LinkConfig::default()).unwrap()
}

fn three_beats() -> SequenceData {
    decode(":|nneeiic1ps:sswwiic1ps|:|eessoocfas:wwnnkka0ds").unwrap()
}

/// A long, repetitive sequence: compresses well below its raw length.
fn long_sequence() -> SequenceData {
    let beat = "nneeiic1ps:sswwiic1ps";
    let tokens: Vec<&str> = std::iter::once(":").chain(std::iter::repeat_n(beat, 64)).collect();
    decode(&tokens.join("|")).unwrap()
}

// =========================================================================
// Share links
// =========================================================================

#[test]
fn test_share_url_round_trips_through_parse() {
    let seq = three_beats();
    let url = builder().share_url(&seq, "construct").unwrap();

    let link = parse_deep_link(&url).expect("link should parse");
    assert_eq!(link.module, "construct");
    assert_eq!(encode(&link.sequence), encode(&seq));
}

#[test]
fn test_open_deep_link_construct_targets_constructor_tab() {
    let payload = encode(&three_beats());
    let (target, link) = open_deep_link(&format!("?open=construct:{payload}")).unwrap();

    assert_eq!(target.module, "create");
    assert_eq!(target.tab, Some("constructor"));
    assert_eq!(link.sequence.total_beats(), 3);
}

#[test]
fn test_open_deep_link_unknown_module_is_ignored() {
    let payload = encode(&three_beats());
    assert!(open_deep_link(&format!("?open=settings:{payload}")).is_none());
    // Still a syntactically valid link.
    assert!(parse_deep_link(&format!("?open=settings:{payload}")).is_some());
}

#[test]
fn test_parse_deep_link_without_open_param_is_none() {
    assert!(parse_deep_link("?sheet=settings").is_none());
    assert!(parse_deep_link("https://app.example.com/").is_none());
}

#[test]
fn test_share_url_long_sequence_is_compressed() {
    let seq = long_sequence();
    let url = builder().share_url(&seq, "gallery").unwrap();
    assert!(url.contains(&format!("gallery:{COMPRESSED_PREFIX}")));

    let raw = generate_share_url(
        builder().origin(),
        &seq,
        "gallery",
        ShareOptions { compress: false },
    )
    .unwrap();
    assert!(url.len() < raw.len());

    let link = parse_deep_link(&url).unwrap();
    assert_eq!(link.sequence.total_beats(), 64);
    assert_eq!(encode(&link.sequence), encode(&seq));
}

// =========================================================================
// Viewer links
// =========================================================================

#[test]
fn test_viewer_url_round_trips() {
    for seq in [three_beats(), long_sequence()] {
        let url = builder().viewer_url(&seq);
        let back = parse_viewer_url(&url).expect("viewer url should parse");
        assert_eq!(encode(&back), encode(&seq));
    }
}

#[test]
fn test_parse_viewer_url_accepts_bare_path() {
    let url = builder().viewer_url(&three_beats());
    let path = url.trim_start_matches("https://app.example.com");
    assert!(path.starts_with("/sequence/"));
    assert!(parse_viewer_url(path).is_some());
}

// =========================================================================
// Pending links
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_pending_link_consumed_after_module_mounts() {
    let config = LinkConfig::default();
    let mut store = PendingLinkStore::from_config(&config);

    let url = builder().share_url(&three_beats(), "construct").unwrap();
    store.store(parse_deep_link(&url).unwrap());

    tokio::time::advance(Duration::from_secs(2)).await;
    let link = store.take().expect("fresh link");
    assert_eq!(link.target().unwrap().tab, Some("constructor"));
}

#[tokio::test(start_paused = true)]
async fn test_pending_link_past_window_is_dropped() {
    let config = LinkConfig::default();
    let mut store = PendingLinkStore::from_config(&config);
    store.store(parse_deep_link(&builder().share_url(&three_beats(), "learn").unwrap()).unwrap());

    tokio::time::advance(config.stale_after + Duration::from_millis(1)).await;
    assert!(store.take().is_none());
}
