//! Page event bridge - stdin/stdout JSON lines to and from the engine
//!
//! The hosting surface (a thin script on the observed page) forwards page
//! events in as JSON lines and renders the overlay directives written back
//! out. Reading EOF ends the bridge; any directives already queued are
//! flushed before it returns.

use std::sync::Arc;

use reelbreak_domain::{ReelbreakError, Result};
use reelbreak_infra::platform::{OverlayDirective, PageEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::AppContext;

/// Pump page events from `reader` through the engine and overlay
/// directives out to `writer` until the event stream ends.
///
/// Malformed event lines are logged and discarded; each line is an
/// independent cycle.
///
/// # Errors
/// Returns `ReelbreakError::Platform` when the directive stream cannot be
/// written. Read errors end the bridge without failing it; the surface is
/// simply gone.
pub async fn run<R, W>(
    ctx: Arc<AppContext>,
    reader: R,
    mut writer: W,
    mut directives: mpsc::UnboundedReceiver<OverlayDirective>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("page event bridge started");
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<PageEvent>(line) {
                            Ok(event) => ctx.handle_page_event(&event).await,
                            Err(err) => warn!(error = %err, "discarding malformed page event"),
                        }
                    }
                    Ok(None) => {
                        debug!("event stream closed");
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "event stream read error");
                        break;
                    }
                }
            }
            directive = directives.recv() => {
                // None means the mirror itself was dropped.
                let Some(directive) = directive else { break };
                write_directive(&mut writer, &directive).await?;
            }
        }
    }

    // A directive raised by the final event may still be queued.
    while let Ok(directive) = directives.try_recv() {
        write_directive(&mut writer, &directive).await?;
    }

    info!("page event bridge stopped");
    Ok(())
}

async fn write_directive<W>(writer: &mut W, directive: &OverlayDirective) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(directive)
        .map_err(|err| ReelbreakError::Internal(format!("failed to encode directive: {err}")))?;
    writer.write_all(json.as_bytes()).await.map_err(stream_error)?;
    writer.write_all(b"\n").await.map_err(stream_error)?;
    writer.flush().await.map_err(stream_error)?;
    Ok(())
}

fn stream_error(err: std::io::Error) -> ReelbreakError {
    ReelbreakError::Platform(format!("directive stream: {err}"))
}
