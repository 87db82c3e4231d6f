pub mod adapters;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod tracker;

pub use config::AppConfig;
pub use error::{TrackerError, TrackerResult};
pub use tracker::{Poller, PollerState};
