//! Observability: logging, metrics, and structured audit events for
//! monitoring training sessions in flight.

pub mod events;
pub mod logging;
pub mod metrics;

pub use events::{Event, EventEmitter};
pub use logging::{LogFormat, init_logging};
pub use metrics::init_metrics;
