use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

use crate::{
    dto::{session::SessionView, sse::ServerEvent},
    state::{SharedState, session::SessionState},
};

/// SSE event name carrying session snapshots.
const SESSION_EVENT: &str = "session";

/// Subscribe to session snapshots.
pub fn subscribe_session(state: &SharedState) -> watch::Receiver<SessionState> {
    state.engine().subscribe()
}

/// Convert a snapshot receiver into an SSE response. The current snapshot is
/// sent immediately, then one event per change until the client disconnects.
pub fn to_sse_stream(
    mut receiver: watch::Receiver<SessionState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    tokio::spawn(async move {
        loop {
            let event = {
                let snapshot = receiver.borrow_and_update();
                session_event(&snapshot)
            };

            if let Some(event) = event
                && tx.send(Ok(event)).await.is_err()
            {
                break;
            }

            tokio::select! {
                _ = tx.closed() => break,
                changed = receiver.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("session SSE stream disconnected");
    });

    // response stream reads from mpsc; when client disconnects axum drops this stream
    let stream = ReceiverStream::new(rx);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn session_event(state: &SessionState) -> Option<Event> {
    match ServerEvent::json(Some(SESSION_EVENT.to_string()), &SessionView::from(state)) {
        Ok(payload) => {
            let mut event = Event::default().data(payload.data);
            if let Some(name) = payload.event {
                event = event.event(name);
            }
            Some(event)
        }
        Err(err) => {
            warn!(error = %err, "failed to serialise session snapshot");
            None
        }
    }
}
