//! Model status display

pub mod dashboard;

pub use dashboard::StatusDashboard;
