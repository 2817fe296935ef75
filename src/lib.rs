//! # Forum Reader
//!
//! A standalone reader for GraphQL-backed discussion forums. It fetches
//! posts, comments, and users from a forum's GraphQL endpoint and renders
//! them as self-contained HTML pages and RSS feeds — no JavaScript, no
//! database, no server-side state between requests.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Every page view is one stateless pass over a freshly fetched snapshot:
//!
//! ```text
//! 1. Fetch     GraphQL API  →  typed records     (posts, comments, users)
//! 2. Thread    flat records →  comment tree      (parent refs resolved)
//! 3. Render    tree         →  markup fragment   (depth-first, banded)
//! 4. Assemble  fragment     →  full document     (HTML page or RSS feed)
//! ```
//!
//! The hard part is stages 2–3: the API returns comments as a flat,
//! unordered collection where each record carries an optional parent
//! reference. [`thread`] rebuilds the rooted tree (tolerating parents that
//! were deleted or never existed), assigns an alternating background band
//! to each depth level, and [`render`] serializes it back into nested
//! markup.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | Stage 1 — GraphQL query construction, HTTP fetch, response decoding |
//! | [`thread`] | Stage 2 — comment tree construction and parity banding |
//! | [`render`] | Stage 3 — depth-first tree serialization, sanitization, escaping |
//! | [`pages`] | Stage 4 — complete HTML documents (post, daily listing, user table) |
//! | [`feed`] | Stage 4 — RSS 2.0 per-user activity feeds |
//! | [`links`] | URL formatting for both addressing styles |
//! | [`config`] | `config.toml` loading, validation, and CSS generation |
//! | [`types`] | Typed records decoded from the API |
//!
//! # Design Decisions
//!
//! ## Orphans Degrade, Nothing Drops
//!
//! The upstream API is known to return comments whose declared parent was
//! deleted or never existed. [`thread::build_thread`] reparents those
//! comments to the top level instead of failing or dropping them, and the
//! same policy extends to cyclic parent references — every fetched comment
//! appears in the rendered thread exactly once, no matter how broken its
//! ancestry is.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, template variables
//! are Rust expressions, and all interpolation is auto-escaped — raw forum
//! HTML enters the output only through an explicit [`maud::PreEscaped`]
//! after the sanitization step in [`render`].
//!
//! ## Synchronous, Request-Scoped Fetching
//!
//! The reader renders one document per invocation, so the HTTP layer is
//! `reqwest`'s blocking client: no async runtime, no connection pool to
//! manage, no shared state. A fetch failure is fatal for the current
//! render — there are no retries and no partial pages.
//!
//! ## Two Addressing Styles
//!
//! Generated links use either a local, query-string style
//! (`./posts?id=…`) for development or the forum's canonical path style
//! (`/posts/<id>/<slug>`). The style is a construction-time configuration
//! value on [`links::Links`], never process-wide mutable state.

pub mod api;
pub mod config;
pub mod feed;
pub mod links;
pub mod pages;
pub mod render;
pub mod thread;
pub mod types;
