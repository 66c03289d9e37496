//! Drift and performance monitoring over the prediction log.

pub mod html;
pub mod metrics;
pub mod reference;
pub mod report;
pub mod server;

pub use html::render_html;
pub use reference::{load_reference, parse_reference, ReferenceRow};
pub use report::{build_report, Analysis, DashboardReport, ReportSettings};
pub use server::{generate_report, DashboardState};
