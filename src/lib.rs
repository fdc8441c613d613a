//! City map viewer core.
//!
//! A bundled list of labeled geographic points becomes markers on a map
//! surface, the user's best-effort position becomes one more, and clicking
//! any marker draws a line from the user to it. The rendering engine, the
//! positioning platform, and the notification channel sit behind traits;
//! the crate ships desktop providers, a recording surface, and a stderr
//! notifier so the whole flow runs headless.

pub mod dataset;
pub mod geo;
pub mod interact;
pub mod location;
pub mod map;
pub mod notify;
pub mod startup;

pub use geo::GeoPoint;
pub use startup::{Phase, StartupSequencer};
