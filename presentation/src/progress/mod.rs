//! Progress reporting for running deliberations

pub mod reporter;

pub use reporter::DeliberationPresenter;
