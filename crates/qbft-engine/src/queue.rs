use std::collections::VecDeque;
use std::sync::Mutex;

use qbft_types::{Height, MsgType, Round, SignedMessage};
use tokio::sync::Notify;

/// Either a real inbound message or a synthetic timer tick (§4.4, §4.7 "Timer
/// ... schedules round-timeout events that are pushed into the queue as
/// synthetic messages").
#[derive(Clone, Debug)]
pub enum QueueItem {
    Timeout { height: Height, round: Round },
    Message(SignedMessage),
}

/// Lower sorts first. Classification depends on the consumer's current
/// `(height, round)`, which is supplied at pop time rather than push time —
/// the instance's round can move between when a message arrives and when
/// it's drained (§4.4 priority rules).
fn priority_class(item: &QueueItem, current_height: Height, current_round: Round) -> u8 {
    match item {
        QueueItem::Timeout { .. } => 0,
        QueueItem::Message(signed) => {
            let at_current_height = signed.message.height == current_height;
            let at_current_round = at_current_height && signed.message.round == current_round;
            match signed.message.msg_type {
                MsgType::Commit if at_current_round => 1,
                MsgType::Prepare if at_current_round => 2,
                MsgType::Proposal if at_current_round => 3,
                MsgType::RoundChange if at_current_height => 4,
                _ => 5,
            }
        }
    }
}

struct Inner {
    items: VecDeque<(u64, QueueItem)>,
    next_seq: u64,
}

/// A bounded, single-consumer priority inbox (§4.4). `try_push` is
/// non-blocking and wait-free with respect to the consumer; `pop` is the
/// only suspension point and classifies items against the caller's current
/// `(height, round)` at the moment of the call.
pub struct PriorityQueue {
    capacity: usize,
    inner: Mutex<Inner>,
    notify: Notify,
}

impl PriorityQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                next_seq: 0,
            }),
            notify: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("queue lock poisoned").items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-blocking; returns `false` without mutating the queue when full.
    pub fn try_push(&self, item: QueueItem) -> bool {
        let mut inner = self.inner.lock().expect("queue lock poisoned");
        if inner.items.len() >= self.capacity {
            return false;
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.items.push_back((seq, item));
        drop(inner);
        self.notify.notify_one();
        true
    }

    /// Pop the item with the lowest `priority_class` for `(current_height,
    /// current_round)`, ties broken by arrival order. Suspends until an item
    /// is available.
    pub async fn pop(&self, current_height: Height, current_round: Round) -> QueueItem {
        loop {
            if let Some(item) = self.try_pop(current_height, current_round) {
                return item;
            }
            self.notify.notified().await;
        }
    }

    /// Non-blocking variant of [`PriorityQueue::pop`], for tests and for
    /// draining without an async runtime.
    pub fn try_pop(&self, current_height: Height, current_round: Round) -> Option<QueueItem> {
        let mut inner = self.inner.lock().expect("queue lock poisoned");
        let best = inner
            .items
            .iter()
            .enumerate()
            .min_by_key(|(_, (seq, item))| (priority_class(item, current_height, current_round), *seq))
            .map(|(index, _)| index)?;
        inner.items.remove(best).map(|(_, item)| item)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use qbft_types::{Message, OperatorId, Role, Signature};

    use super::*;

    fn message(msg_type: MsgType, height: u64, round: u64) -> SignedMessage {
        let id = qbft_types::MessageId::new(&[1u8; qbft_types::PUBKEY_LEN], Role::Attester);
        let message = Message::new(msg_type, Height::new(height), Round::new(round), id, Vec::new());
        let mut signers = BTreeSet::new();
        signers.insert(OperatorId::new(1));
        SignedMessage::new(message, signers, Signature(Vec::new()))
    }

    #[test]
    fn timeout_outranks_everything_at_current_round() {
        let queue = PriorityQueue::new(8);
        assert!(queue.try_push(QueueItem::Message(message(MsgType::Commit, 1, 1))));
        assert!(queue.try_push(QueueItem::Timeout {
            height: Height::ONE,
            round: Round::ONE
        }));

        let popped = queue.try_pop(Height::ONE, Round::ONE).unwrap();
        assert!(matches!(popped, QueueItem::Timeout { .. }));
    }

    #[test]
    fn commit_outranks_prepare_outranks_proposal_at_current_round() {
        let queue = PriorityQueue::new(8);
        queue.try_push(QueueItem::Message(message(MsgType::Proposal, 1, 1)));
        queue.try_push(QueueItem::Message(message(MsgType::Prepare, 1, 1)));
        queue.try_push(QueueItem::Message(message(MsgType::Commit, 1, 1)));

        let first = queue.try_pop(Height::ONE, Round::ONE).unwrap();
        let second = queue.try_pop(Height::ONE, Round::ONE).unwrap();
        let third = queue.try_pop(Height::ONE, Round::ONE).unwrap();

        assert!(matches!(first, QueueItem::Message(m) if m.message.msg_type == MsgType::Commit));
        assert!(matches!(second, QueueItem::Message(m) if m.message.msg_type == MsgType::Prepare));
        assert!(matches!(third, QueueItem::Message(m) if m.message.msg_type == MsgType::Proposal));
    }

    #[test]
    fn full_queue_rejects_without_dropping_existing_items() {
        let queue = PriorityQueue::new(1);
        assert!(queue.try_push(QueueItem::Timeout {
            height: Height::ONE,
            round: Round::ONE
        }));
        assert!(!queue.try_push(QueueItem::Timeout {
            height: Height::ONE,
            round: Round::new(2)
        }));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn ties_within_a_class_preserve_arrival_order() {
        let queue = PriorityQueue::new(8);
        queue.try_push(QueueItem::Timeout {
            height: Height::ONE,
            round: Round::ONE,
        });
        queue.try_push(QueueItem::Timeout {
            height: Height::ONE,
            round: Round::new(2),
        });

        let QueueItem::Timeout { round: first, .. } = queue.try_pop(Height::ONE, Round::ONE).unwrap() else {
            panic!("expected timeout");
        };
        assert_eq!(first, Round::ONE);
    }
}
