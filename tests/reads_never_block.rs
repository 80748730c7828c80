//! `contains` must never block behind a writer holding predecessor locks (§5).

use std::thread;
use std::time::Duration;

use crossbeam_channel::bounded;
use lazy_skipset::SkipSet;

#[test]
fn contains_keeps_answering_while_a_writer_churns() {
    let set = &SkipSet::new(Default::default()).unwrap();
    assert!(set.add(b"seed"));

    let (done_sender, done_receiver) = bounded(0);
    thread::scope(|scope| {
        scope.spawn(move || {
            for i in 0..50_000u32 {
                let _ = set.add(&i.to_be_bytes());
                let _ = set.remove(&i.to_be_bytes());
            }
            done_sender.send(()).unwrap();
        });

        // If `contains` ever blocked on the writer's locks, this loop would stall until the
        // writer finishes; bound it instead so a regression fails the test rather than hanging.
        loop {
            assert!(set.contains(b"seed"));
            if done_receiver.recv_timeout(Duration::from_nanos(1)).is_ok() {
                break;
            }
        }
    });
}
