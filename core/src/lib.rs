//! Observable, remotely synchronized records.
//!
//! # Overview
//! A `Model` holds one record and composes three injected collaborators:
//! attribute storage (`ModelAttributes`), named events (`Events`) and remote
//! persistence (`RemoteSync`). Writes emit `"change"`; `fetch` and `save`
//! round-trip the record through the sync adapter and report completion
//! through events.
//!
//! # Design
//! - The model never constructs its collaborators. `AttributeStore`,
//!   `Eventing` and `ApiSync` are the defaults; tests swap in stubs.
//! - Everything is single-threaded: collaborators use `RefCell` and the
//!   returned futures are not `Send`.
//! - `ApiSync` follows the host-does-IO split: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`, and an injected
//!   `HttpTransport` executes the round-trip.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod attributes;
pub mod error;
pub mod events;
pub mod http;
pub mod model;
pub mod record;
pub mod sync;
pub mod types;

pub use attributes::{AttributeStore, ModelAttributes};
pub use error::{ModelError, SyncError};
pub use events::{Eventing, Events};
#[cfg(feature = "ureq")]
pub use http::UreqTransport;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use model::Model;
pub use record::Record;
pub use sync::{ApiSync, RemoteSync};
pub use types::{build_user, UserModel, UserProps};
