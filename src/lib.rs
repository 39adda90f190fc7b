//! Cloudflare Edge API Client
//!
//! Typed access to the Cloudflare v4 REST API: DNS record CRUD with
//! idempotent upsert and batch submission, cache purge, IP access rules,
//! and zone lookup. Every response goes through the uniform success/error
//! envelope; transport details live behind a narrow [`transport::Transport`]
//! seam.

pub mod access;
pub mod cache;
pub mod client;
pub mod dns;
pub mod envelope;
pub mod error;
pub mod scope;
pub mod transport;
pub mod zones;

pub use client::{CloudflareClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use scope::Scope;
