//! QuickFX Conversion Coordinator
//!
//! Owns the converter's state, reduces user events into new state snapshots,
//! issues rate fetches when the currency pair changes, and derives the values
//! a presentation layer shows.
//!
//! State changes go through the pure [`reduce`] function. The [`Coordinator`]
//! wraps it with a rate provider: events that need a rate produce a
//! [`FetchRequest`], and the fetch result comes back as
//! [`Event::RateResolved`]. Results for anything but the latest request are
//! dropped.

pub mod coordinator;
pub mod error;
pub mod format;
pub mod metrics;
pub mod state;
pub mod view;

pub use coordinator::Coordinator;
pub use error::RefreshError;
pub use format::{format_amount, format_rate};
pub use metrics::{Metrics, MetricsSnapshot};
pub use state::{reduce, ConverterState, Disposition, Event, FetchRequest, FetchStatus, Transition};
pub use view::ConverterView;
