use futures_channel::mpsc::{TrySendError, UnboundedSender};
use serde::{Deserialize, Serialize};
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, warn};

use crate::command::{Command, Snapshot};
use crate::error::Result;

/// Frames the server pushes to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    State(Snapshot),
    Error { text: String },
}

impl ServerMessage {
    pub fn error(text: impl ToString) -> ServerMessage {
        ServerMessage::Error { text: text.to_string() }
    }
}

/// Decodes a client frame. Frames that carry no command (pings, binary,
/// close) yield `None`.
pub fn parse_input(input: &Message) -> Result<Option<Command>> {
    match input {
        Message::Text(text) => {
            debug!("Received a message: {}", text);
            Ok(Some(serde_json::from_str(text)?))
        }
        _ => Ok(None),
    }
}

pub fn message_send(sender: &UnboundedSender<Message>, message: &ServerMessage) {
    match serde_json::to_string(message) {
        Ok(text) => sender
            .unbounded_send(Message::Text(text))
            .unwrap_or_else(sent_fail_notify),
        Err(err) => warn!("Could not encode message: {}", err),
    }
}

fn sent_fail_notify(_: TrySendError<Message>) {
    warn!("Could not send message.")
}
