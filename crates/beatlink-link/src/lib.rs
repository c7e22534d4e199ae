//! Share links and deep links for Beatlink.
//!
//! This crate wraps the protocol's encoded strings into URLs and back:
//!
//! 1. **Generation**: [`LinkBuilder`], [`generate_share_url`],
//!    [`generate_viewer_url`]
//! 2. **Parsing**: [`parse_deep_link`], [`parse_viewer_url`],
//!    [`open_deep_link`] (parse + module resolution)
//! 3. **Module aliases**: [`resolve_module`] maps `construct`, `gallery`,
//!    ... to a [`ModuleTarget`]
//! 4. **Pending links**: [`PendingLinkStore`] holds a parsed link for a
//!    short staleness window
//! 5. **URL sync**: [`UrlSync`] debounces re-encoding during edits
//!
//! # How it fits in the stack
//!
//! ```text
//! App navigation (above)  ← consumes ModuleTarget + SequenceData
//!     ↕
//! Link layer (this crate) ← URLs, aliases, staleness, debouncing
//!     ↕
//! Protocol layer (below)  ← encode/decode, compression
//! ```

mod config;
mod error;
mod links;
mod modules;
mod store;
mod sync;

pub use config::LinkConfig;
pub use error::LinkError;
pub use links::{
    DeepLink, LinkBuilder, OPEN_PARAM, RawDeepLink, ShareOptions, VIEWER_PATH,
    generate_share_url, generate_viewer_url, open_deep_link, parse_deep_link,
    parse_viewer_url,
};
pub use modules::{ModuleTarget, module_aliases, resolve_module};
pub use store::PendingLinkStore;
pub use sync::UrlSync;
