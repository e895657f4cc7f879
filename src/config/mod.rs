//! Configuration: YAML schema, defaults, and loading.

pub mod loader;
pub mod schema;

pub use loader::load;
pub use schema::{
    DeliveryConfig, SequenceConfig, ServerConfig, SessionConfig, SiemulateConfig,
};
