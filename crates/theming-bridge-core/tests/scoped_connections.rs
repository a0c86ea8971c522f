//! Integration tests for scoped signal connections shared across owners.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use theming_bridge_core::{ConnectionGuard, Property, Signal};

/// A subscriber that owns its connections, the way the theme relay does.
struct Subscriber {
    seen: Arc<Property<Vec<u32>>>,
    guards: Vec<ConnectionGuard<u32>>,
}

impl Subscriber {
    fn attach(signals: &[&Signal<u32>]) -> Self {
        let seen = Arc::new(Property::new(Vec::new()));
        let guards = signals
            .iter()
            .map(|signal| {
                let seen = seen.clone();
                signal.connect_scoped(move |&value| seen.update(|v| v.push(value)))
            })
            .collect();
        Self { seen, guards }
    }
}

#[test]
fn dropping_subscriber_releases_every_connection() {
    let first = Signal::<u32>::new();
    let second = Signal::<u32>::new();

    let subscriber = Subscriber::attach(&[&first, &second]);
    assert_eq!(first.connection_count(), 1);
    assert_eq!(second.connection_count(), 1);

    first.emit(1);
    second.emit(2);
    let seen = subscriber.seen.clone();
    assert_eq!(seen.get(), vec![1, 2]);

    drop(subscriber);
    assert_eq!(first.connection_count(), 0);
    assert_eq!(second.connection_count(), 0);

    first.emit(3);
    assert_eq!(seen.get(), vec![1, 2]);
}

#[test]
fn guards_survive_their_signal() {
    let subscriber = {
        let signal = Signal::<u32>::new();
        let subscriber = Subscriber::attach(&[&signal]);
        signal.emit(7);
        subscriber
    };

    assert!(subscriber.guards.iter().all(|g| !g.is_connected()));
    assert_eq!(subscriber.seen.get(), vec![7]);
}

#[test]
fn emissions_from_other_threads_reach_slots() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let signal = Arc::new(Signal::<u32>::new());
    let hits = Arc::new(AtomicUsize::new(0));

    let hits_clone = hits.clone();
    let _guard = signal.connect_scoped(move |_| {
        hits_clone.fetch_add(1, Ordering::SeqCst);
    });

    let emitter = {
        let signal = signal.clone();
        std::thread::spawn(move || {
            for i in 0..25 {
                signal.emit(i);
            }
        })
    };
    emitter.join().unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 25);
}
