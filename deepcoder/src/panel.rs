//! Host glue between a chat panel and a [`ChatSession`].
//!
//! The panel posts raw JSON messages; events flow back over an unbounded
//! channel. Submissions are handled one at a time in arrival order.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{ChatSession, UiEvent, UnboundedUiSink};

pub struct PanelChannels {
    pub inbound_tx: UnboundedSender<String>,
    pub inbound_rx: UnboundedReceiver<String>,
    pub ui: Arc<UnboundedUiSink>,
    pub events_rx: UnboundedReceiver<UiEvent>,
}

pub fn panel_channels() -> PanelChannels {
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    PanelChannels {
        inbound_tx,
        inbound_rx,
        ui: Arc::new(UnboundedUiSink::new(events_tx)),
        events_rx,
    }
}

/// Drains `inbound` until every sender is dropped. Returns the number of
/// messages that produced an event.
pub async fn serve_panel(session: &ChatSession, mut inbound: UnboundedReceiver<String>) -> usize {
    let mut answered = 0;

    while let Some(raw) = inbound.recv().await {
        match session.handle_inbound(&raw).await {
            Ok(Some(_)) => answered += 1,
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    session_id = %session.id(),
                    error_kind = ?err.kind,
                    "ignoring malformed panel message"
                );
            }
        }
    }

    answered
}
