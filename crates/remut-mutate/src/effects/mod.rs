//! I/O: the transport abstraction and the mutation state machine.

mod mutation;
mod transport;

pub use mutation::Mutation;
pub use transport::Transport;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
