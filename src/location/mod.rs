//! Positioning subsystem for cityfinder.
//!
//! An ordered cascade of providers, each answering with its last-known fix:
//! explicit coordinates first, network-derived position second, passively
//! collected fixes last. The cascade takes the first cached answer it finds
//! and never blocks on acquiring a fresh one.

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod types;

pub use cache::FixStore;
pub use providers::{FixProvider, IpProvider, ManualProvider, PassiveProvider};
pub use resolver::LocationResolver;
pub use types::{Fix, FixSource, ProviderError};
