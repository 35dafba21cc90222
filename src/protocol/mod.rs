//! Kafka wire protocol subset: ApiVersions (18) and DescribeTopicPartitions (75).
//!
//! Frame: int32 (BE) length + body.
//! Request: header v2 (api_key, api_version, correlation_id, compact client_id, tags) + body.

pub mod api;
mod dispatch;
mod header;
pub mod primitives;
mod response;

pub use api::{find_api, supported_apis, ApiDescriptor};
pub use dispatch::{dispatch, handle_request};
pub use header::{decode_request_header, RequestHeader};
pub use response::{
    api_versions, describe_topic_partitions, unsupported_version, Response, ResponseKind,
};
