pub mod dashboard;

pub use dashboard::DashboardHome;
