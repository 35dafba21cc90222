//! TCP server that speaks the Kafka wire protocol subset.

use super::frame::FrameReader;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::observability::observability;
use crate::protocol::{decode_request_header, dispatch, find_api};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

/// Run the server loop (binds to `config.listen_addr`).
pub async fn run_server(config: Arc<ServerConfig>) -> Result<()> {
    let listener = TcpListener::bind(&config.listen_addr).await?;
    run_server_on_listener(config, listener).await
}

/// Run the server on an existing listener (e.g. from bind("127.0.0.1:0")).
pub async fn run_server_on_listener(
    config: Arc<ServerConfig>,
    listener: TcpListener,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("tidewire listening on {}", addr);
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(x) => x,
            Err(e) => {
                error!("accept error: {}", e);
                continue;
            }
        };
        observability().record_connection();
        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = serve_connection(stream, config.max_frame_len).await {
                error!("connection {} error: {}", peer, e);
            }
        });
    }
}

/// Serve one client until it closes the stream or a read/write fails.
///
/// Malformed frames get no reply and do not end the connection.
pub async fn serve_connection<S>(stream: S, max_frame_len: usize) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut frames = FrameReader::new(read_half, max_frame_len);
    while let Some(frame) = frames.next_frame().await? {
        let started = Instant::now();
        let (header, pos) = match decode_request_header(&frame) {
            Ok(x) => x,
            Err(e) => {
                debug!(len = frame.len(), "dropping frame: {}", e);
                observability().record_dropped_frame();
                continue;
            }
        };
        let api = find_api(header.api_key).map(|a| a.name).unwrap_or("unknown");
        let span = tracing::info_span!(
            "tidewire.request",
            api_key = header.api_key,
            api_version = header.api_version,
            api
        );
        let resp = {
            let _entered = span.enter();
            debug!(
                correlation_id = header.correlation_id,
                client_id = header.client_id.as_deref().unwrap_or(""),
                "request"
            );
            match dispatch(&header, &frame, pos) {
                Ok(r) => r,
                Err(e) => {
                    debug!(correlation_id = header.correlation_id, "dropping frame: {}", e);
                    observability().record_dropped_frame();
                    continue;
                }
            }
        };
        let framed = resp.frame();
        debug!(parent: &span, kind = ?resp.kind, len = framed.len(), "response");
        write_half.write_all(&framed).await?;
        write_half.flush().await?;
        observability().record_response(resp.kind, started.elapsed());
    }
    Ok(())
}
