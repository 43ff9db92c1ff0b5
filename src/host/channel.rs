//! Line-delimited JSON transport for the host channel.
//!
//! Inbound frames are dispatched strictly in arrival order: every core
//! handler is spawned onto the current-thread runtime in read order, so
//! handler *starts* follow frame order while a slow renderer never
//! blocks the read loop — the render gate, not the loop, serializes
//! tree access. Outbound events flow through an unbounded queue and a
//! writer task, so emitting never suspends a handler.

use std::rc::Rc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::host::{EditorEvent, HostRequest, ProtocolError};
use crate::render::Renderer;
use crate::status::TimePeriodController;
use crate::view::ViewerSession;

/// Serve a viewer session over the given transport until the host closes
/// its end.
///
/// Must run inside a [`tokio::task::LocalSet`]. A `refresh` is posted
/// first thing so the host delivers the initial document. Malformed
/// frames are logged and dropped; only transport loss is an error.
pub async fn serve<R, I, O>(
    session: Rc<ViewerSession<R>>,
    status: &mut TimePeriodController,
    input: I,
    output: O,
    events: mpsc::UnboundedReceiver<EditorEvent>,
) -> Result<(), ProtocolError>
where
    R: Renderer + 'static,
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin + 'static,
{
    tokio::task::spawn_local(write_events(output, events));
    session.request_refresh();

    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HostRequest>(&line) {
            Ok(request) => dispatch(&session, status, request),
            Err(err) => tracing::warn!(%err, "dropping malformed host frame"),
        }
    }
    tracing::debug!("host closed the channel");
    Ok(())
}

fn dispatch<R: Renderer + 'static>(
    session: &Rc<ViewerSession<R>>,
    status: &mut TimePeriodController,
    request: HostRequest,
) {
    match request {
        // The status feature owns its own state; ordering relative to
        // the core handlers does not matter.
        HostRequest::SelectionChanged(notice) => status.on_selection_changed(&notice),
        HostRequest::ActiveEditorChanged(notice) => {
            status.on_active_editor_changed(notice.as_ref());
        }
        core => {
            let session = Rc::clone(session);
            tokio::task::spawn_local(async move {
                match core {
                    HostRequest::SetData(update) => session.replace_tree(update).await,
                    HostRequest::SetCursor(cursor) => {
                        session.focus_line(cursor.line, cursor.auto_expand).await;
                    }
                    HostRequest::SetCss(css) => session.apply_stylesheet(css),
                    HostRequest::CheckTheme(classes) => {
                        session.check_theme(&classes.unwrap_or_default());
                    }
                    HostRequest::DownloadSvg(path) => session.export_svg(path),
                    HostRequest::ToggleNode(recursive) => {
                        session.toggle_node(recursive.unwrap_or(false));
                    }
                    HostRequest::SelectionChanged(_) | HostRequest::ActiveEditorChanged(_) => {}
                }
            });
        }
    }
}

async fn write_events<O: AsyncWrite + Unpin>(
    mut output: O,
    mut events: mpsc::UnboundedReceiver<EditorEvent>,
) {
    while let Some(event) = events.recv().await {
        let mut frame = match serde_json::to_string(&event) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(%err, "dropping unencodable outbound event");
                continue;
            }
        };
        frame.push('\n');
        if let Err(err) = output.write_all(frame.as_bytes()).await {
            tracing::warn!(%err, "outbound channel lost");
            break;
        }
        if let Err(err) = output.flush().await {
            tracing::warn!(%err, "outbound channel lost");
            break;
        }
    }
}
