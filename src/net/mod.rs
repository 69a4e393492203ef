//! Network boundary: wire types and the credential gateway.

pub mod gateway;
pub mod types;
