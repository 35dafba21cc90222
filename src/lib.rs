//! Tidewire: a minimal Kafka wire-protocol server answering ApiVersions and
//! DescribeTopicPartitions over TCP.

pub mod admin;
pub mod config;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod server;

pub use config::ServerConfig;
pub use error::{Result, TidewireError};
pub use protocol::{handle_request, ApiDescriptor, RequestHeader, Response, ResponseKind};
