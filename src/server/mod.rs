//! TCP server for the Kafka wire protocol subset.

mod connection;
pub mod frame;

pub use connection::{run_server, run_server_on_listener, serve_connection};
pub use frame::FrameReader;
