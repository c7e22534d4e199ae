//! # Beatlink
//!
//! Compact sharing for choreography sequences.
//!
//! A sequence of beats (each beat one motion per hand) is squeezed into a
//! short, URL-safe string and carried in a share link. Opening the link
//! decodes the sequence, routes to the right module, and optionally fills
//! in derived grid positions and letters.
//!
//! ## Quick Start
//!
//! ```rust
//! use beatlink::prelude::*;
//!
//! let seq = decode(":|nneeiic1ps:sswwiic1ps").unwrap();
//! let links = LinkBuilder::new(&LinkConfig::default()).unwrap();
//! let url = links.share_url(&seq, "construct").unwrap();
//!
//! let (target, link) = open_deep_link(&url).unwrap();
//! assert_eq!(target.tab, Some("constructor"));
//! assert_eq!(link.sequence.total_beats(), 1);
//! ```

pub mod error;

pub use beatlink_derive as derive;
pub use beatlink_link as link;
pub use beatlink_protocol as protocol;
pub use error::BeatlinkError;

/// Everything most callers need, in one import.
pub mod prelude {
    pub use crate::error::BeatlinkError;
    pub use beatlink_derive::{
        CompassResolver, LetterLookup, LetterTable, PositionResolver, enrich_sequence,
    };
    pub use beatlink_link::{
        DeepLink, LinkBuilder, LinkConfig, ModuleTarget, PendingLinkStore, UrlSync,
        open_deep_link, parse_deep_link, parse_viewer_url, resolve_module,
    };
    pub use beatlink_protocol::{
        Beat, HandColor, Location, Motion, MotionType, Orientation, PropType,
        RotationDirection, SequenceData, Turns, decode, decode_with_compression, encode,
        encode_with_compression,
    };
}

/// Installs a `tracing` subscriber that writes to stderr, filtered by
/// `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
