//! In-process broadcast bus connecting presentation peers.
//!
//! Every message is serialized into a JSON [`SyncEnvelope`] and queued for
//! every peer except the sender. Peers drain their inbox either
//! synchronously ([`BusPeer::deliver_pending`]) or from a local task
//! ([`BusPeer::run`]). Delivery is best-effort and at-most-once.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

use super::{MessageHandler, PresentationChannel, Subscription};
use crate::slide::SlideAction;

/// Identity of one peer connected to a [`LocalBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerId(pub u64);

/// Wire form of one broadcast message.
///
/// `seq` is assigned by the bus in send order; `ts_unix_ms` is wall-clock
/// capture time used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEnvelope {
    pub seq: u64,
    pub ts_unix_ms: u64,
    pub origin: PeerId,
    pub event: String,
    pub payload: SlideAction,
}

impl SyncEnvelope {
    pub fn new(seq: u64, origin: PeerId, event: &str, payload: SlideAction) -> Self {
        Self {
            seq,
            ts_unix_ms: now_unix_millis(),
            origin,
            event: event.to_string(),
            payload,
        }
    }
}

#[derive(Default)]
struct Inbox {
    queue: RefCell<VecDeque<String>>,
    notify: Notify,
}

#[derive(Default)]
struct BusState {
    next_peer: u64,
    seq: u64,
    peers: Vec<(PeerId, Weak<Inbox>)>,
}

type SharedHandler = Rc<dyn Fn(SlideAction)>;

#[derive(Default)]
struct HandlerTable {
    next_id: Cell<u64>,
    by_event: RefCell<HashMap<String, Vec<(u64, SharedHandler)>>>,
}

impl HandlerTable {
    fn for_event(&self, event: &str) -> Vec<SharedHandler> {
        self.by_event
            .borrow()
            .get(event)
            .map(|handlers| handlers.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default()
    }

    fn remove(&self, event: &str, id: u64) {
        let mut by_event = self.by_event.borrow_mut();
        if let Some(handlers) = by_event.get_mut(event) {
            handlers.retain(|(handler_id, _)| *handler_id != id);
            if handlers.is_empty() {
                by_event.remove(event);
            }
        }
    }
}

/// Broadcast hub. Clones share the same set of peers.
#[derive(Clone, Default)]
pub struct LocalBus {
    state: Rc<RefCell<BusState>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new peer. The peer detaches when dropped.
    pub fn connect(&self) -> BusPeer {
        let inbox = Rc::new(Inbox::default());
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_peer += 1;
            let id = PeerId(state.next_peer);
            state.peers.push((id, Rc::downgrade(&inbox)));
            id
        };
        tracing::debug!(peer = id.0, "peer connected to sync bus");
        BusPeer {
            id,
            bus: Rc::clone(&self.state),
            inbox,
            handlers: Rc::new(HandlerTable::default()),
        }
    }

    /// Number of peers currently attached.
    pub fn peer_count(&self) -> usize {
        self.state.borrow().peers.len()
    }
}

/// One participant on a [`LocalBus`].
pub struct BusPeer {
    id: PeerId,
    bus: Rc<RefCell<BusState>>,
    inbox: Rc<Inbox>,
    handlers: Rc<HandlerTable>,
}

impl BusPeer {
    pub fn id(&self) -> PeerId {
        self.id
    }

    /// Envelopes queued but not yet delivered.
    pub fn pending(&self) -> usize {
        self.inbox.queue.borrow().len()
    }

    /// Drain the inbox, invoking the handlers registered for each envelope's
    /// event. Returns how many envelopes were decoded and delivered.
    pub fn deliver_pending(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.inbox.queue.borrow_mut().pop_front();
            let Some(raw) = next else {
                break;
            };
            let envelope = match serde_json::from_str::<SyncEnvelope>(&raw) {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::warn!(peer = self.id.0, %err, "dropping undecodable sync envelope");
                    continue;
                }
            };
            let handlers = self.handlers.for_event(&envelope.event);
            tracing::trace!(
                peer = self.id.0,
                origin = envelope.origin.0,
                seq = envelope.seq,
                event = %envelope.event,
                handlers = handlers.len(),
                "delivering sync envelope"
            );
            for handler in handlers {
                handler(envelope.payload);
            }
            delivered += 1;
        }
        delivered
    }

    /// Deliver messages as they arrive. Runs until the surrounding task is
    /// dropped or aborted.
    pub async fn run(&self) {
        loop {
            self.deliver_pending();
            self.inbox.notify.notified().await;
        }
    }

    #[cfg(test)]
    pub(crate) fn push_raw(&self, raw: &str) {
        self.inbox.queue.borrow_mut().push_back(raw.to_string());
        self.inbox.notify.notify_one();
    }
}

impl PresentationChannel for BusPeer {
    fn send_message(&self, event_name: &str, payload: &SlideAction) {
        let (seq, targets) = {
            let mut bus = self.bus.borrow_mut();
            bus.seq += 1;
            let targets = bus
                .peers
                .iter()
                .filter(|(id, _)| *id != self.id)
                .filter_map(|(_, inbox)| inbox.upgrade())
                .collect::<Vec<_>>();
            (bus.seq, targets)
        };
        let envelope = SyncEnvelope::new(seq, self.id, event_name, *payload);
        let raw = match serde_json::to_string(&envelope) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(peer = self.id.0, %err, "failed to encode sync envelope");
                return;
            }
        };
        for inbox in targets {
            inbox.queue.borrow_mut().push_back(raw.clone());
            inbox.notify.notify_one();
        }
    }

    fn add_message_handler(&self, handler: MessageHandler, event_name: &str) -> Subscription {
        let id = self.handlers.next_id.get();
        self.handlers.next_id.set(id + 1);
        self.handlers
            .by_event
            .borrow_mut()
            .entry(event_name.to_string())
            .or_default()
            .push((id, Rc::from(handler)));

        let table = Rc::downgrade(&self.handlers);
        let event = event_name.to_string();
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.remove(&event, id);
            }
        })
    }
}

impl Drop for BusPeer {
    fn drop(&mut self) {
        self.bus.borrow_mut().peers.retain(|(id, _)| *id != self.id);
        tracing::debug!(peer = self.id.0, "peer left sync bus");
    }
}

fn now_unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|delta| delta.as_millis() as u64)
        .unwrap_or(0)
}
