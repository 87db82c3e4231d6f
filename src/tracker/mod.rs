pub mod diff;
pub mod poller;
pub mod state;

pub use diff::{diff, IncidentEvent};
pub use poller::{Poller, RunStats};
pub use state::PollerState;
