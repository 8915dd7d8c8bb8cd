//! # Runtime Module
//!
//! The client side of a generated site, modeled as a single-threaded state
//! machine over the embedded [`crate::route::SiteArtifact`].
//!
//! ## Navigation
//!
//! ```text
//! location ──► resolve_candidate ──► match_candidate ──► apply_route
//!                    │ None                │ None            │
//!                    ▼                     ▼                 ├─ api ──────► render ──► Render, Ready
//!                entrance             not-found view         └─ content ──► AwaitingContent
//!                                                                            │ fetch
//!                                                                            ▼
//!                                                                  complete_fetch ──► render
//! ```
//!
//! Every applied route bumps a generation counter; a fetch completed for an
//! older generation is discarded so a slow fragment never overwrites a newer
//! view.
//!
//! Event order for one successful navigation is `Navigate`, `Route`,
//! `Render`, and `Ready` after the very first render only.

mod error;
mod events;
mod fetch;
mod location;
mod matcher;
mod render;
mod resolver;
mod router;

pub use error::RouterError;
pub use events::{EventBus, EventKind, ListenerId, RouterEvent};
pub use fetch::{ContentFetcher, FetchError, NoFetch};
pub use location::LocationSnapshot;
pub use matcher::{entrance_candidate, match_candidate};
pub use render::{
    Container, HtmlBuffer, MiniJinjaPartials, PartialRenderer, Renderer, View, API_PARTIAL, CONTENT_PARTIAL,
    NOT_FOUND_PARTIAL,
};
pub use resolver::{resolve_candidate, resolve_route_path, Candidate};
pub use router::{Navigation, PendingFetch, RenderCallback, RenderStatus, Router, RouterState};
