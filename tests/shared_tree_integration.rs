//! Integration tests for sharing a tree between threads.

use std::sync::Arc;
use std::thread;

use twofourdb::{SharedTree, TwoFourTree};

/// Concurrent writers on disjoint key ranges.
#[test]
fn test_concurrent_writers() {
    let tree = Arc::new(SharedTree::new());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for k in 0..500 {
                    assert!(tree.insert(t * 1_000 + k));
                }
                for k in (0..500).step_by(2) {
                    assert!(tree.delete(t * 1_000 + k));
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(tree.len(), 4 * 250);
    tree.validate().unwrap();
    for t in 0..4 {
        assert!(!tree.contains(t * 1_000));
        assert!(tree.contains(t * 1_000 + 1));
    }
}

/// Readers observe either the old or the new state of each key, never a torn tree.
#[test]
fn test_readers_during_writes() {
    let tree = Arc::new(SharedTree::from_tree((0..1_000).collect::<TwoFourTree>()));

    let writer = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || {
            for k in 1_000..2_000 {
                tree.insert(k);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for _ in 0..20 {
                    for k in (0..1_000).step_by(37) {
                        assert!(tree.contains(k));
                    }
                    let keys = tree.in_order();
                    assert!(keys.windows(2).all(|w| w[0] < w[1]));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    assert_eq!(tree.len(), 2_000);
    let stats = tree.stats_snapshot();
    assert_eq!(stats.inserts, 2_000);
}
