//! Response builders and framing.
//!
//! Each builder writes the header and body separately; `frame` joins them
//! behind a 4-byte big-endian length.

use super::api::{
    supported_apis, ERROR_NONE, ERROR_UNKNOWN_TOPIC_OR_PARTITION, ERROR_UNSUPPORTED_VERSION,
};
use super::primitives::{put_compact_string, put_empty_tag_buffer, put_uvarint};
use bytes::{BufMut, BytesMut};

const NULL_CURSOR: u8 = 0xff;
const TOPIC_ID_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    ApiVersions,
    DescribeTopicPartitions,
    UnsupportedVersion,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub kind: ResponseKind,
    pub header: BytesMut,
    pub body: BytesMut,
}

impl Response {
    /// Prepend the 4-byte frame length (BE) to header + body.
    pub fn frame(&self) -> BytesMut {
        let len = self.header.len() + self.body.len();
        let mut out = BytesMut::with_capacity(4 + len);
        out.put_u32(len as u32);
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.body);
        out
    }
}

/// Response header v0: correlation_id, no tagged fields.
fn header_v0(correlation_id: i32) -> BytesMut {
    let mut dst = BytesMut::with_capacity(4);
    dst.put_i32(correlation_id);
    dst
}

/// Response header v1: correlation_id + empty tag buffer.
fn header_v1(correlation_id: i32) -> BytesMut {
    let mut dst = BytesMut::with_capacity(5);
    dst.put_i32(correlation_id);
    put_empty_tag_buffer(&mut dst);
    dst
}

/// DescribeTopicPartitions v0 for a topic this server never knows about.
pub fn describe_topic_partitions(correlation_id: i32, topic_name: &[u8]) -> Response {
    let mut body = BytesMut::with_capacity(40 + topic_name.len());
    body.put_i32(0); // throttle_time_ms
    put_uvarint(&mut body, 2); // topics: one entry
    body.put_i16(ERROR_UNKNOWN_TOPIC_OR_PARTITION);
    put_compact_string(&mut body, topic_name);
    body.put_bytes(0, TOPIC_ID_LEN);
    body.put_u8(0); // is_internal
    put_uvarint(&mut body, 1); // partitions: empty
    body.put_i32(0); // topic_authorized_operations
    put_empty_tag_buffer(&mut body);
    body.put_u8(NULL_CURSOR);
    put_empty_tag_buffer(&mut body);
    Response {
        kind: ResponseKind::DescribeTopicPartitions,
        header: header_v1(correlation_id),
        body,
    }
}

/// Version-negotiation failure keeps the legacy header: no tag buffer.
pub fn unsupported_version(correlation_id: i32) -> Response {
    let mut body = BytesMut::with_capacity(2);
    body.put_i16(ERROR_UNSUPPORTED_VERSION);
    Response {
        kind: ResponseKind::UnsupportedVersion,
        header: header_v0(correlation_id),
        body,
    }
}

/// ApiVersions v3/v4 body with the advertised API table.
pub fn api_versions(correlation_id: i32) -> Response {
    let apis = supported_apis();
    let mut body = BytesMut::with_capacity(8 + apis.len() * 7);
    body.put_i16(ERROR_NONE);
    put_uvarint(&mut body, apis.len() as u64 + 1);
    for api in apis {
        body.put_i16(api.api_key);
        body.put_i16(api.min_version);
        body.put_i16(api.max_version);
        put_empty_tag_buffer(&mut body);
    }
    body.put_i32(0); // throttle_time_ms
    put_empty_tag_buffer(&mut body);
    Response {
        kind: ResponseKind::ApiVersions,
        header: header_v0(correlation_id),
        body,
    }
}
