pub mod human;
pub mod simulate;
pub mod terminal;
pub mod watch;

pub use human::HumanMode;
pub use simulate::{SimulateConfig, SimulateMode};
pub use watch::WatchMode;
