//! View model: what the viewer sees, independent of the terminal
//!
//! - [`projection`] - state to render instructions per view mode
//! - [`controller`] - active mode, tab and collapsed sections
//! - [`banner`] - auto-dismissing error message
//! - [`card`] - per-record render instructions

pub mod banner;
pub mod card;
pub mod controller;
pub mod projection;

pub use banner::{BANNER_TIMEOUT, ErrorBanner};
pub use card::{Card, CardKind};
pub use controller::{ViewController, ViewError, parse_section};
pub use projection::{
    ComparisonView, Panel, Projection, SequentialView, Tab, TabbedView, ViewProjector,
};
