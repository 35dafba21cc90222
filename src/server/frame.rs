//! Length-prefixed frame reader.
//!
//! Frame: int32 (BE) length + that many bytes. Lengths <= 0 carry no body and
//! are skipped; anything above the configured maximum closes the connection.

use crate::error::{Result, TidewireError};
use crate::observability::observability;
use bytes::{Buf, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

const LEN_PREFIX: usize = 4;
const READ_CHUNK: usize = 4096;

#[derive(Debug, PartialEq, Eq)]
pub enum Decoded {
    Frame(Bytes),
    /// Length prefix <= 0; prefix consumed, nothing else.
    Empty(i32),
}

/// Decode one frame from the front of `src`. Returns None if more bytes are needed.
pub fn decode_frame(src: &mut BytesMut, max_frame_len: usize) -> Result<Option<Decoded>> {
    if src.len() < LEN_PREFIX {
        return Ok(None);
    }
    let len = i32::from_be_bytes([src[0], src[1], src[2], src[3]]);
    if len <= 0 {
        src.advance(LEN_PREFIX);
        return Ok(Some(Decoded::Empty(len)));
    }
    let len = len as usize;
    if len > max_frame_len {
        return Err(TidewireError::FrameTooLarge {
            len,
            max: max_frame_len,
        });
    }
    if src.len() < LEN_PREFIX + len {
        return Ok(None);
    }
    src.advance(LEN_PREFIX);
    Ok(Some(Decoded::Frame(src.split_to(len).freeze())))
}

/// Reads whole frames off a byte stream, accumulating short reads.
pub struct FrameReader<R> {
    inner: R,
    buf: BytesMut,
    max_frame_len: usize,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R, max_frame_len: usize) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(READ_CHUNK),
            max_frame_len,
        }
    }

    /// Next frame body, or None once the peer has closed the stream cleanly.
    ///
    /// A close part way through a length prefix counts as clean; a close part
    /// way through a body is an error.
    pub async fn next_frame(&mut self) -> Result<Option<Bytes>> {
        loop {
            match decode_frame(&mut self.buf, self.max_frame_len)? {
                Some(Decoded::Frame(body)) => return Ok(Some(body)),
                Some(Decoded::Empty(len)) => {
                    trace!(len, "skipping empty frame");
                    observability().record_empty_frame();
                    continue;
                }
                None => {}
            }
            self.buf.reserve(READ_CHUNK);
            let n = self.inner.read_buf(&mut self.buf).await?;
            if n == 0 {
                if self.buf.len() < LEN_PREFIX {
                    return Ok(None);
                }
                return Err(TidewireError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed mid-frame",
                )));
            }
        }
    }
}
