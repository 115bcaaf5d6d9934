//! Immutable data types for mutations.
//!
//! Configuration, request and state types passed between the pure core and
//! the effectful state machine. Nothing here performs I/O.

pub mod options;
pub mod request;
pub mod scope;
pub mod state;

pub use options::{Credentials, Headers, OptionsProvider, RequestOptions};
pub use request::{Invocation, ParseVerbError, Payload, RequestDescriptor, Verb};
pub use scope::{MutationConfig, Scope};
pub use state::{ErrorState, Meta, MutationState, Response, States};
