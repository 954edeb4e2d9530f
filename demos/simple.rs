//! Minimal tour of the savak API: an unbounded channel pipeline with a
//! countdown gate and a receive select.

use savak::Countdown;
use savak_channel::{select, unbounded};
use std::sync::Arc;
use std::thread;

fn main() {
    // Unbounded channel: producers never block.
    let (tx, rx) = unbounded::<i32>();
    let done = Arc::new(Countdown::new(2));

    for id in 0..2 {
        let tx = tx.clone();
        let done = done.clone();
        thread::spawn(move || {
            for i in 0..3 {
                tx.send(id * 10 + i);
            }
            done.dec();
        });
    }

    // Drain six values in whatever interleaving the producers managed.
    for _ in 0..6 {
        let v = rx.recv().expect("stream is still open");
        println!("received {}", v);
    }

    // Close once both producers are done; the drained channel then
    // reports the end of the stream instead of blocking.
    done.wait();
    tx.close();
    assert_eq!(rx.recv(), None);

    // Receive select: completes on the first channel with a value and
    // leaves the others alone.
    let (s1, r1) = unbounded::<&str>();
    let (_s2, r2) = unbounded::<&str>();
    s1.send("first");

    let (index, value) = select(&[&r1, &r2]);
    println!("select: channel {} delivered {:?}", index, value);
}
