//! Mock implementation of [`campus_core::Bot`] for integration tests.
//!
//! Records every outbound call so tests can assert on reply text, keyboards, edits, callback
//! acknowledgements and which messages were tracked for retraction, without hitting Telegram.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use campus_core::{Bot, Chat, OutgoingMessage, Result};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum BotCall {
    Send {
        chat_id: i64,
        message_id: String,
        message: OutgoingMessage,
        tracked: bool,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        message: OutgoingMessage,
    },
    Retract {
        chat_id: i64,
        count: usize,
    },
    Ack {
        callback_id: String,
        toast: Option<String>,
    },
}

/// Mock Bot that hands out increasing message ids and keeps the tracked ids per chat.
#[derive(Default)]
pub struct MockBot {
    next_id: AtomicU64,
    calls: Mutex<Vec<BotCall>>,
    tracked: Mutex<HashMap<i64, Vec<String>>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_message_id(&self) -> String {
        (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forgets recorded calls; tracked ids are kept.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Text of every sent (not edited) message, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Send { message, .. } => Some(message.text),
                _ => None,
            })
            .collect()
    }

    pub fn last_sent(&self) -> Option<OutgoingMessage> {
        self.calls().into_iter().rev().find_map(|c| match c {
            BotCall::Send { message, .. } => Some(message),
            _ => None,
        })
    }

    pub fn last_text(&self) -> String {
        self.last_sent().map(|m| m.text).unwrap_or_default()
    }

    pub fn edits(&self) -> Vec<(String, OutgoingMessage)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Edit {
                    message_id,
                    message,
                    ..
                } => Some((message_id, message)),
                _ => None,
            })
            .collect()
    }

    pub fn acks(&self) -> Vec<(String, Option<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Ack { callback_id, toast } => Some((callback_id, toast)),
                _ => None,
            })
            .collect()
    }

    /// Number of messages currently tracked for the chat.
    pub fn tracked_count(&self, chat_id: i64) -> usize {
        self.tracked
            .lock()
            .unwrap()
            .get(&chat_id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn push_send(&self, chat: &Chat, message: &OutgoingMessage, tracked: bool) -> String {
        let message_id = self.next_message_id();
        if tracked {
            self.tracked
                .lock()
                .unwrap()
                .entry(chat.id)
                .or_default()
                .push(message_id.clone());
        }
        self.record(BotCall::Send {
            chat_id: chat.id,
            message_id: message_id.clone(),
            message: message.clone(),
            tracked,
        });
        message_id
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String> {
        Ok(self.push_send(chat, message, false))
    }

    async fn send_and_track(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String> {
        Ok(self.push_send(chat, message, true))
    }

    async fn retract_tracked(&self, chat: &Chat) -> Result<usize> {
        let count = self
            .tracked
            .lock()
            .unwrap()
            .remove(&chat.id)
            .map(|ids| ids.len())
            .unwrap_or(0);
        self.record(BotCall::Retract {
            chat_id: chat.id,
            count,
        });
        Ok(count)
    }

    async fn edit(&self, chat: &Chat, message_id: &str, message: &OutgoingMessage) -> Result<()> {
        self.record(BotCall::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            message: message.clone(),
        });
        Ok(())
    }

    async fn acknowledge_callback(&self, callback_id: &str, toast: Option<&str>) -> Result<()> {
        self.record(BotCall::Ack {
            callback_id: callback_id.to_string(),
            toast: toast.map(str::to_string),
        });
        Ok(())
    }
}
