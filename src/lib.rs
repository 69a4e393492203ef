//! # luxora-client
//!
//! Native session core for the Luxora storefront client: tracks whether a
//! visitor is signed in, mediates credential submission against the
//! storefront API, and persists the session so it survives a restart.
//!
//! ARCHITECTURE
//! ============
//! A pure transition function ([`state::session::next`]) computes every
//! state change; [`services::session::SessionController`] orchestrates
//! the async login/signup flow against a [`net::gateway::CredentialGateway`]
//! and mirrors successes into a [`services::persistence::SessionStorage`]
//! slot; [`provider::use_session`] is the only surface UI code touches.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use luxora_client::net::gateway::{ApiConfig, HttpCredentialGateway};
//! use luxora_client::provider::{SessionProvider, use_session};
//! use luxora_client::services::persistence::FileSessionStorage;
//!
//! # async fn run() {
//! let provider = SessionProvider::initialize(
//!     Arc::new(HttpCredentialGateway::new(ApiConfig::from_env())),
//!     Arc::new(FileSessionStorage::new("/tmp/luxora/session.json")),
//! );
//! provider
//!     .scope(async {
//!         let session = use_session();
//!         session.login("admin@luxora.com", "admin123").await;
//!         assert!(session.is_authenticated());
//!     })
//!     .await;
//! # }
//! ```

pub mod net;
pub mod provider;
pub mod services;
pub mod state;
