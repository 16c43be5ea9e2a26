//! §8 S5 — queue overflow under a timer storm, driven as a standalone
//! integration test against [`PriorityQueue`] (no runtime, no duty runner).

use qbft_engine::{PriorityQueue, QueueItem};
use qbft_types::{Height, Round};

#[test]
fn n_plus_one_timeouts_into_a_capacity_n_queue() {
    const N: usize = 5;
    let queue = PriorityQueue::new(N);

    let mut accepted = 0;
    let mut rejected = 0;
    for round in 1..=(N as u64 + 1) {
        if queue.try_push(QueueItem::Timeout {
            height: Height::ONE,
            round: Round::new(round),
        }) {
            accepted += 1;
        } else {
            rejected += 1;
        }
    }

    assert_eq!(accepted, N);
    assert_eq!(rejected, 1);
    assert_eq!(queue.len(), N);

    // Every accepted item is a Timeout, so they all share the top priority
    // class; draining must return them in the order they arrived.
    for expected_round in 1..=(N as u64) {
        let QueueItem::Timeout { round, .. } = queue.try_pop(Height::ONE, Round::ONE).unwrap() else {
            panic!("expected a timeout item");
        };
        assert_eq!(round, Round::new(expected_round));
    }
    assert!(queue.is_empty());
}
