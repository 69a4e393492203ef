//! Session services.
//!
//! ARCHITECTURE
//! ============
//! Service modules own orchestration and persistence concerns so the
//! state layer can stay a pure transition function and the provider can
//! stay a thin access scope.

pub mod persistence;
pub mod session;
