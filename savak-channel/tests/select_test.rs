use savak_channel::{select, try_select, unbounded};
use std::thread;
use std::time::Duration;

#[test]
fn test_select_ready() {
    let (_s0, r0) = unbounded::<i32>();
    let (s1, r1) = unbounded::<i32>();
    let (_s2, r2) = unbounded::<i32>();

    s1.send(42);

    let (index, value) = select(&[&r0, &r1, &r2]);
    assert_eq!(index, 1);
    assert_eq!(value, Some(42));

    // The losing channels are untouched.
    assert_eq!(r0.len(), 0);
    assert_eq!(r2.len(), 0);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_blocking() {
    // No candidate is ready when select is called; the producer with the
    // shortest sleep decides the call.
    let mut rxs = vec![];
    let mut handles = vec![];
    for i in 0..3 {
        let (s, r) = unbounded::<i32>();
        rxs.push(r);
        let delay = if i == 1 { 30 } else { 300 };
        handles.push(thread::spawn(move || {
            thread::sleep(Duration::from_millis(delay));
            s.send(10 * i);
        }));
    }

    let (index, value) = select(&[&rxs[0], &rxs[1], &rxs[2]]);
    assert_eq!(index, 1);
    assert_eq!(value, Some(10));

    for h in handles {
        h.join().unwrap();
    }

    // The slower producers' values are still sitting in their channels.
    assert_eq!(rxs[0].recv(), Some(0));
    assert_eq!(rxs[2].recv(), Some(20));
}

#[test]
fn test_select_closed_channel_terminates() {
    let (s, r) = unbounded::<i32>();
    s.close();

    // A closed drained candidate completes the select immediately with
    // the end-of-stream outcome.
    let (index, value) = select(&[&r]);
    assert_eq!(index, 0);
    assert_eq!(value, None);
}

#[test]
fn test_select_prefers_live_value_over_closed_stream() {
    let (s0, r0) = unbounded::<i32>();
    let (s1, r1) = unbounded::<i32>();
    s0.close();
    s1.send(7);

    // The non-blocking scan finds the live value before the blocking
    // phase could report channel 0's terminator.
    let (index, value) = select(&[&r0, &r1]);
    assert_eq!(index, 1);
    assert_eq!(value, Some(7));
}

#[test]
fn test_select_exclusivity() {
    // Exactly one candidate delivers per call; nothing is consumed from
    // the others.
    let (s0, r0) = unbounded::<i32>();
    let (s1, r1) = unbounded::<i32>();
    let (s2, r2) = unbounded::<i32>();
    s0.send(1);
    s1.send(2);
    s2.send(3);

    let receivers = [&r0, &r1, &r2];
    let mut seen = vec![];

    let (_, value) = select(&receivers);
    seen.push(value.unwrap());
    assert_eq!(r0.len() + r1.len() + r2.len(), 2);

    let (_, value) = select(&receivers);
    seen.push(value.unwrap());
    let (_, value) = select(&receivers);
    seen.push(value.unwrap());

    assert_eq!(r0.len() + r1.len() + r2.len(), 0);
    seen.sort();
    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_single_channel() {
    let (s, r) = unbounded::<i32>();
    let t = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        s.send(7);
    });

    assert_eq!(select(&[&r]), (0, Some(7)));
    t.join().unwrap();
}

#[test]
#[should_panic(expected = "select on empty channel list")]
fn test_select_empty_panics() {
    select::<i32>(&[]);
}

#[test]
fn test_try_select() {
    let (s0, r0) = unbounded::<i32>();
    let (_s1, r1) = unbounded::<i32>();

    assert_eq!(try_select(&[&r0, &r1]), None);

    s0.send(9);
    assert_eq!(try_select(&[&r0, &r1]), Some((0, 9)));
    assert_eq!(try_select(&[&r0, &r1]), None);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_drain_loop() {
    // Three producers feed their own channels and close them; repeated
    // selects drain every value exactly once, in per-channel order, and
    // retire each channel on its terminator.
    const PER_CHANNEL: usize = 30;

    let mut rxs = vec![];
    let mut handles = vec![];
    for c in 0..3usize {
        let (s, r) = unbounded::<usize>();
        rxs.push(r);
        handles.push(thread::spawn(move || {
            for seq in 0..PER_CHANNEL {
                s.send(c * 1000 + seq);
                if seq % 10 == 0 {
                    thread::yield_now();
                }
            }
            s.close();
        }));
    }

    let mut live: Vec<usize> = (0..3).collect();
    let mut next = [0usize; 3];
    let mut total = 0;
    while !live.is_empty() {
        let candidates: Vec<_> = live.iter().map(|&c| &rxs[c]).collect();
        let (index, value) = select(&candidates);
        let c = live[index];
        match value {
            Some(v) => {
                assert_eq!(v, c * 1000 + next[c], "channel {} out of order", c);
                next[c] += 1;
                total += 1;
            }
            None => {
                assert_eq!(next[c], PER_CHANNEL);
                live.remove(index);
            }
        }
    }
    assert_eq!(total, 3 * PER_CHANNEL);

    for h in handles {
        h.join().unwrap();
    }
}
