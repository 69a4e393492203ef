//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is kept per domain so consumers can depend on small focused
//! models; `session` is the only domain this crate owns.

pub mod session;
