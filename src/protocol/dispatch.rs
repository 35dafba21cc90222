//! Per-request dispatch: decode the header, pick a handler, build the response.
//!
//! An `Err` from `handle_request` means the frame was malformed and must be
//! dropped without a reply; the connection itself stays open.

use super::api::{api_versions_descriptor, API_DESCRIBE_TOPIC_PARTITIONS};
use super::header::{decode_request_header, RequestHeader};
use super::primitives::{decode_compact_string, decode_uvarint, skip_tag_buffer};
use super::response::{self, Response};
use crate::error::{Result, TidewireError};

/// Handle one frame body and return the response to send.
pub fn handle_request(frame: &[u8]) -> Result<Response> {
    let (header, pos) = decode_request_header(frame)?;
    dispatch(&header, frame, pos)
}

/// Route a decoded header to its response builder. `pos` is where the request body starts.
pub fn dispatch(header: &RequestHeader, frame: &[u8], pos: usize) -> Result<Response> {
    if header.api_key == API_DESCRIBE_TOPIC_PARTITIONS {
        let topic = read_first_topic(frame, pos)?;
        return Ok(response::describe_topic_partitions(
            header.correlation_id,
            topic,
        ));
    }
    if !api_versions_descriptor().supports(header.api_version) {
        return Ok(response::unsupported_version(header.correlation_id));
    }
    Ok(response::api_versions(header.correlation_id))
}

/// DescribeTopicPartitions request body; only the first topic is read.
fn read_first_topic(frame: &[u8], pos: usize) -> Result<&[u8]> {
    let (topics_plus_one, pos) = decode_uvarint(frame, pos)?;
    if topics_plus_one < 2 {
        return Err(TidewireError::Malformed(
            "describe topic partitions: no topics".into(),
        ));
    }
    let (name, pos) = decode_compact_string(frame, pos)?;
    let pos = skip_tag_buffer(frame, pos)?; // topic tags
    skip_tag_buffer(frame, pos)?; // request tags
    Ok(name.unwrap_or_default())
}
