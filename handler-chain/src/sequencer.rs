//! Per-chat sequencing in front of the handler chain.
//!
//! Each chat gets an unbounded queue and a worker task that feeds the chain one event at a time,
//! so one chat's events never overlap or reorder while other chats proceed in parallel.

use campus_core::Event;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::HandlerChain;

type QueueSender = mpsc::UnboundedSender<Event>;

pub struct ChatSequencer {
    chain: HandlerChain,
    queues: DashMap<i64, QueueSender>,
}

impl ChatSequencer {
    pub fn new(chain: HandlerChain) -> Self {
        Self {
            chain,
            queues: DashMap::new(),
        }
    }

    /// Enqueues the event on its chat's queue, starting the chat's worker on first use.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, event: Event) {
        let chat_id = event.chat().id;
        let tx = self.sender_for(chat_id);
        if let Err(mpsc::error::SendError(event)) = tx.send(event) {
            // Worker ended (e.g. a handler panicked); replace it and retry once.
            warn!(chat_id = chat_id, "Chat worker gone, restarting");
            self.queues.remove(&chat_id);
            if self.sender_for(chat_id).send(event).is_err() {
                error!(chat_id = chat_id, "Failed to enqueue event");
            }
        }
    }

    /// Number of chats that currently have a worker.
    pub fn active_chats(&self) -> usize {
        self.queues.len()
    }

    fn sender_for(&self, chat_id: i64) -> QueueSender {
        self.queues
            .entry(chat_id)
            .or_insert_with(|| self.spawn_worker(chat_id))
            .clone()
    }

    fn spawn_worker(&self, chat_id: i64) -> QueueSender {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let chain = self.chain.clone();
        info!(chat_id = chat_id, "Starting chat worker");
        tokio::spawn(Self::process_queue_loop(rx, chain, chat_id));
        tx
    }

    async fn process_queue_loop(
        mut rx: mpsc::UnboundedReceiver<Event>,
        chain: HandlerChain,
        chat_id: i64,
    ) {
        while let Some(event) = rx.recv().await {
            if let Err(e) = chain.handle(&event).await {
                error!(error = %e, chat_id = chat_id, "Handler chain failed");
            }
        }
    }
}
