use std::sync::Arc;
use std::thread;

use rwlru::{Error, LruCache};

const THREADS: usize = 8;
const OPS: usize = 2_000;

fn assert_consistent(cache: &LruCache<usize, usize>) {
    let keys = cache.keys().unwrap();
    let values = cache.values().unwrap();
    let order = cache.keys_by_recency().unwrap();
    let count = cache.count().unwrap();

    assert!(count <= cache.capacity());
    assert_eq!(keys.len(), count);
    assert_eq!(values.len(), count);
    assert_eq!(order.len(), count);
    for key in &order {
        assert!(keys.contains(key));
        assert!(values.contains_key(key));
    }
}

#[test]
fn test_concurrent_writers_respect_capacity() {
    let cache = Arc::new(LruCache::new(64).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS {
                    cache.set(t * OPS + i, i).unwrap();
                    assert!(cache.count().unwrap() <= 64);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.count().unwrap(), 64);
    assert_eq!(cache.stats().inserts(), (THREADS * OPS) as u64);
    assert_eq!(cache.stats().evictions(), (THREADS * OPS - 64) as u64);
    assert_consistent(&cache);
}

#[test]
fn test_concurrent_readers_and_writers() {
    let cache = Arc::new(LruCache::new(32).unwrap());
    for i in 0..32 {
        cache.set(i, i * 2).unwrap();
    }

    let writers: Vec<_> = (0..THREADS / 2)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS {
                    let key = (t * 7 + i) % 96;
                    cache.set(key, key * 2).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..THREADS / 2)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS {
                    let key = (t * 13 + i) % 96;
                    if let Some(value) = cache.get(&key).unwrap() {
                        // Every writer stores key * 2
                        assert_eq!(value, key * 2);
                    }
                    cache.contains_key(&key).unwrap();
                    assert!(cache.keys().unwrap().len() <= 32);
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.hits() + stats.misses(), ((THREADS / 2) * OPS) as u64);
    assert_consistent(&cache);
}

#[test]
fn test_hot_key_survives_under_contention() {
    // Each thread inserts at most once between two touches of the hot key
    let cache = Arc::new(LruCache::new(THREADS + 1).unwrap());
    cache.set(usize::MAX, 0).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS {
                    assert_eq!(cache.get(&usize::MAX).unwrap(), Some(0));
                    cache.set(t * OPS + i, i).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_consistent(&cache);
}

#[test]
fn test_close_while_shared() {
    let cache = Arc::new(LruCache::new(8).unwrap());
    cache.set(1, 1).unwrap();

    let other = Arc::clone(&cache);
    thread::spawn(move || other.close()).join().unwrap();

    assert!(cache.is_closed());
    assert_eq!(cache.get(&1), Err(Error::Closed));
    assert_eq!(cache.set(2, 2), Err(Error::Closed));
    cache.close();
}
