pub mod list;

pub use list::TripsMonitor;
