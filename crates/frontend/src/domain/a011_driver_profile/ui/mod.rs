pub mod list;
pub mod tracker;

pub use list::DriversManagement;
pub use tracker::DriverTracker;
