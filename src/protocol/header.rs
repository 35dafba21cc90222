//! Request header v2: api_key, api_version, correlation_id, compact client_id, tags.

use super::primitives::{decode_compact_string, skip_tag_buffer};
use crate::error::{Result, TidewireError};
use bytes::Buf;

const FIXED_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    pub api_key: i16,
    pub api_version: i16,
    pub correlation_id: i32,
    pub client_id: Option<String>,
}

/// Decode the request header from a frame body. Returns (header, body_start).
pub fn decode_request_header(body: &[u8]) -> Result<(RequestHeader, usize)> {
    if body.len() < FIXED_HEADER_LEN {
        return Err(TidewireError::Malformed(format!(
            "short request header: {} bytes",
            body.len()
        )));
    }
    let mut fixed = &body[..FIXED_HEADER_LEN];
    let api_key = fixed.get_i16();
    let api_version = fixed.get_i16();
    let correlation_id = fixed.get_i32();

    let (client_id, pos) = decode_compact_string(body, FIXED_HEADER_LEN)?;
    let pos = skip_tag_buffer(body, pos)?;

    Ok((
        RequestHeader {
            api_key,
            api_version,
            correlation_id,
            client_id: client_id.map(|b| String::from_utf8_lossy(b).into_owned()),
        },
        pos,
    ))
}
