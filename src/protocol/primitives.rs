//! Kafka compact primitives: unsigned varints, compact strings, tag buffers.
//!
//! Decoders take the whole frame body and a read position and return the new
//! position, so a failed decode leaves the caller's cursor untouched.

use crate::error::{Result, TidewireError};
use bytes::{BufMut, BytesMut};

/// A u64 never needs more than ten 7-bit groups.
const MAX_UVARINT_LEN: usize = 10;

/// Decode an unsigned varint starting at `pos`. Returns (value, new_pos).
pub fn decode_uvarint(buf: &[u8], pos: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    let mut cur = pos;
    loop {
        let b = *buf.get(cur).ok_or(TidewireError::Truncated("uvarint"))?;
        cur += 1;
        value |= u64::from(b & 0x7f) << shift;
        if b & 0x80 == 0 {
            return Ok((value, cur));
        }
        if cur - pos >= MAX_UVARINT_LEN {
            return Err(TidewireError::Malformed("uvarint too long".into()));
        }
        shift += 7;
    }
}

/// Append the minimal unsigned varint encoding of `value`.
pub fn put_uvarint(dst: &mut BytesMut, mut value: u64) {
    while value > 0x7f {
        dst.put_u8((value as u8) | 0x80);
        value >>= 7;
    }
    dst.put_u8(value as u8);
}

pub fn encode_uvarint(value: u64) -> Vec<u8> {
    let mut dst = BytesMut::with_capacity(MAX_UVARINT_LEN);
    put_uvarint(&mut dst, value);
    dst.to_vec()
}

/// Decode a compact nullable string. Length 0 on the wire is null.
///
/// The bytes are returned raw so they can be echoed back exactly as received.
pub fn decode_compact_string(buf: &[u8], pos: usize) -> Result<(Option<&[u8]>, usize)> {
    let (len_plus_one, pos) = decode_uvarint(buf, pos)?;
    if len_plus_one == 0 {
        return Ok((None, pos));
    }
    let len = checked_len(buf, pos, len_plus_one - 1, "compact string")?;
    Ok((Some(&buf[pos..pos + len]), pos + len))
}

/// Append a non-null compact string: uvarint len+1, then the bytes.
pub fn put_compact_string(dst: &mut BytesMut, s: &[u8]) {
    put_uvarint(dst, s.len() as u64 + 1);
    dst.extend_from_slice(s);
}

pub fn encode_compact_string(s: &[u8]) -> Vec<u8> {
    let mut dst = BytesMut::with_capacity(s.len() + 2);
    put_compact_string(&mut dst, s);
    dst.to_vec()
}

/// Skip a tag buffer without interpreting its contents. Returns new_pos.
pub fn skip_tag_buffer(buf: &[u8], pos: usize) -> Result<usize> {
    let (size_plus_one, pos) = decode_uvarint(buf, pos)?;
    // 0 would be size -1 under the count+1 rule; taken as an empty buffer.
    if size_plus_one == 0 {
        return Ok(pos);
    }
    let len = checked_len(buf, pos, size_plus_one - 1, "tag buffer")?;
    Ok(pos + len)
}

/// Empty tag buffer.
pub fn put_empty_tag_buffer(dst: &mut BytesMut) {
    dst.put_u8(0);
}

fn checked_len(buf: &[u8], pos: usize, len: u64, what: &'static str) -> Result<usize> {
    let remaining = buf.len().saturating_sub(pos);
    match usize::try_from(len) {
        Ok(n) if n <= remaining => Ok(n),
        _ => Err(TidewireError::Truncated(what)),
    }
}
