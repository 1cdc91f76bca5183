//! Reinhardt DOM - Capability-typed adapter over a live host DOM
//!
//! A thin, typed layer over the document object model of a host that is
//! only reachable through an opaque interop value (a browser through
//! `wasm-bindgen`, or the in-memory [`testing`] host).
//!
//! ## Features
//!
//! - **Capability Traits**: narrow contracts ([`Queryer`], [`Class`], [`Style`],
//!   [`EventTarget`], [`EventSource`], [`HtmlElement`], [`Window`], [`Document`])
//!   so callers depend only on what they use
//! - **Single Wrapper**: [`Node`] implements every trait and caches nothing
//! - **Listener Lifecycle**: [`ListenerHandle`] unregisters and frees the
//!   host callback bridge exactly once
//! - **Host Agnostic**: everything runs over [`HostValue`]; native tests use
//!   [`testing::MockDom`]
//!
//! ## Architecture
//!
//! - [`host`]: the interop boundary ([`HostValue`], [`HostCallback`])
//! - [`capability`]: the capability traits
//! - [`node`]: the [`Node`] wrapper
//! - [`listener`]: [`ListenerHandle`]
//! - [`window`](mod@window): root entry points
//! - [`logging`]: `debug_log!` and friends
//! - [`testing`]: the mock host
//! - `web`: the browser host (wasm32 only)
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_dom::{Class, Document, EventTarget, HtmlElement, Window};
//!
//! let document = reinhardt_dom::web::window().document();
//! let button = document.query_selector("#save");
//! button.class().add(&["primary"]);
//!
//! let handle = button.add_event_listener("click", false, |event| {
//!     event.prevent_default();
//! });
//! // Dropping `handle` removes the listener.
//! ```

#![warn(missing_docs)]

// Core modules
pub mod capability;
pub mod host;
pub mod listener;
pub mod logging;
pub mod node;
pub mod window;

// Hosts
pub mod testing;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use capability::{
	Class, Document, Event, EventSource, EventTarget, HtmlElement, Nullable, Queryer, Style,
	Underlying, Window,
};
pub use host::{HostCallback, HostValue};
pub use listener::ListenerHandle;
pub use node::Node;
pub use window::{new_event, null, undefined, window};
