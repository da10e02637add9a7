//! Protocol configuration.
//!
//! A configuration picks the mode and the source quality weight. Documents
//! are YAML or JSON, checked against schema/protocol.schema.json before
//! they are deserialized.

mod parser;
mod schema;

pub use parser::{ConfigError, ProtocolConfig};
pub use schema::{is_valid_config, validate_config_schema};
