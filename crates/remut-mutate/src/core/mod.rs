//! Pure transformations: URL composition and request assembly.
//!
//! Nothing in this module performs I/O; every function is a deterministic
//! function of its explicit inputs.

mod path;
mod request;

pub use path::{child_scope, compose_path, normalize_path, resolve_url};
pub use request::build_request;
