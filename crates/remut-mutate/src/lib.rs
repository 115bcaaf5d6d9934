//! Declarative HTTP mutations with an observable lifecycle.
//!
//! A [`Mutation`] binds one POST/PUT/PATCH/DELETE definition to a [`Scope`]
//! and a [`Transport`]. Each call to [`Mutation::mutate`] moves the slot
//! through `loading` to a success or error state that observers can read or
//! watch, and hands the raw response back to the caller.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration, request and state types
//! - [`core`] - Pure transformations (URL composition, request assembly)
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Scopes
//!
//! Base URLs and default request options are passed down explicitly.
//! [`Scope::nest`] (or [`Mutation::child_scope`]) derives the scope for
//! nested definitions so their paths compose additively.
//!
//! ```
//! use remut_mutate::{MutationConfig, Scope, Verb, core::resolve_url};
//!
//! let teams = Scope::root("https://api.example.com").nest("teams/7");
//! let config = MutationConfig::new(Verb::Post).path("widgets");
//! assert_eq!(resolve_url(&teams, &config), "https://api.example.com/teams/7/widgets");
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::build_request;
pub use data::{
    Credentials, ErrorState, Headers, Invocation, Meta, MutationConfig, MutationState,
    OptionsProvider, ParseVerbError, Payload, RequestDescriptor, RequestOptions, Response, Scope,
    States, Verb,
};
pub use effects::{Mutation, Transport};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestTransport;

pub use error::{BoxError, Error, Result};

/// Response header types.
pub use http::{HeaderMap, HeaderValue, header};
