//! Stress-testing utilities, exposed publicly so downstream crates embedding a [`SkipSet`] can
//! reuse them, the way the ambient test tooling in this corpus is usually shipped alongside the
//! library rather than buried in `tests/`.
//!
//! [`SkipSet`]: crate::SkipSet

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::thread;

use rand::prelude::*;

use crate::SkipSet;

/// Draws a short random byte string, biased toward a small alphabet so that concurrent stress
/// runs produce plenty of contention (collisions between threads targeting the same key).
pub fn random_bytes(rng: &mut impl Rng) -> Vec<u8> {
    let len = rng.gen_range(1..=4);
    (0..len).map(|_| rng.gen_range(b'a'..=b'j')).collect()
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Contains,
    Add,
    Remove,
}

const OPS: [Op; 3] = [Op::Contains, Op::Add, Op::Remove];

/// Runs `steps` random operations against `set` in the current thread, cross-checking every
/// result against a [`BTreeSet`] oracle driven by the same operations.
pub fn stress_sequential(set: &SkipSet, steps: usize) {
    let mut rng = thread_rng();
    let mut oracle = BTreeSet::<Vec<u8>>::new();

    for _ in 0..steps {
        let value = random_bytes(&mut rng);
        match OPS.choose(&mut rng).unwrap() {
            Op::Contains => assert_eq!(set.contains(&value), oracle.contains(&value)),
            Op::Add => assert_eq!(set.add(&value), oracle.insert(value)),
            Op::Remove => assert_eq!(set.remove(&value), oracle.remove(&value)),
        }
    }
}

/// Spawns `threads` threads, each performing `steps` random operations against `set`
/// concurrently. Does not check individual results (they're racy by construction); this is for
/// exercising the locking discipline under `loom`-free, real-thread contention (deadlock,
/// panics, and crashes are still caught).
pub fn stress_concurrent(set: &SkipSet, threads: usize, steps: usize) {
    thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| {
                let mut rng = thread_rng();
                for _ in 0..steps {
                    let value = random_bytes(&mut rng);
                    match OPS.choose(&mut rng).unwrap() {
                        Op::Contains => {
                            let _ = set.contains(&value);
                        }
                        Op::Add => {
                            let _ = set.add(&value);
                        }
                        Op::Remove => {
                            let _ = set.remove(&value);
                        }
                    }
                }
            });
        }
    });
}

#[derive(Debug, Clone)]
enum Log {
    Add { key: Vec<u8>, result: bool },
    Remove { key: Vec<u8>, result: bool },
}

impl Log {
    fn key(&self) -> &[u8] {
        match self {
            Log::Add { key, .. } | Log::Remove { key, .. } => key,
        }
    }
}

/// Runs `threads` threads of `steps` add/remove operations each, recording every outcome, then
/// checks that the per-key history is consistent: a key successfully removed `n` times must have
/// been successfully added at least `n` times first.
///
/// This is weaker than full linearizability checking, but it catches the most likely bug class
/// in a lazy list: a `remove` that reports success for a key nothing ever successfully added, or
/// vice versa.
pub fn log_concurrent(set: &SkipSet, threads: usize, steps: usize) {
    let logs = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                scope.spawn(|| {
                    let mut rng = thread_rng();
                    let mut logs = Vec::with_capacity(steps);
                    for _ in 0..steps {
                        let key = random_bytes(&mut rng);
                        if rng.gen_bool(0.5) {
                            let result = set.add(&key);
                            logs.push(Log::Add { key, result });
                        } else {
                            let result = set.remove(&key);
                            logs.push(Log::Remove { key, result });
                        }
                    }
                    logs
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>()
    });

    assert_logs_consistent(&logs);
}

fn assert_logs_consistent(logs: &[Vec<Log>]) {
    let mut adds: std::collections::HashMap<Vec<u8>, usize> = std::collections::HashMap::new();
    let mut removes: std::collections::HashMap<Vec<u8>, usize> = std::collections::HashMap::new();

    for thread_log in logs {
        for entry in thread_log {
            match entry {
                Log::Add { result: true, .. } => *adds.entry(entry.key().to_vec()).or_insert(0) += 1,
                Log::Remove { result: true, .. } => {
                    *removes.entry(entry.key().to_vec()).or_insert(0) += 1
                }
                _ => {}
            }
        }
    }

    for (key, removed) in &removes {
        let added = adds.get(key).copied().unwrap_or(0);
        assert!(
            added >= *removed,
            "key {key:?} was removed {removed} times but only added {added} times"
        );
    }
}
