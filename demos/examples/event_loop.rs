// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host loop integration.
//!
//! Shows the busy-wait replacement end to end: the host blocks on "next raw
//! sample OR next deadline" with `recv_timeout`, so a deferred single click
//! fires from the timeout path while double clicks resolve on the fast path,
//! and the loop never spins.
//!
//! Run:
//! - `cargo run -p gemini_demos --example event_loop`

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use gemini_input::{Clock, Dispatcher, MonotonicClock, Point, RawSample, PRIMARY};

fn main() {
    let clock = MonotonicClock::new();
    let (tx, rx) = mpsc::channel::<RawSample>();

    // A stand-in platform driver: one lone click, then a double click.
    let driver_clock = clock.clone();
    let driver = thread::spawn(move || {
        let mut send = |delay_ms: u64, pos: Point, press: bool| {
            thread::sleep(Duration::from_millis(delay_ms));
            let t = driver_clock.now_ms();
            let s = if press {
                RawSample::press(PRIMARY, t, pos)
            } else {
                RawSample::release(PRIMARY, t, pos)
            };
            tx.send(s).unwrap();
        };
        send(10, Point::new(10, 10), true);
        send(30, Point::new(10, 10), false);
        // Far outside the double-click window, start a chained pair.
        send(600, Point::new(30, 30), true);
        send(30, Point::new(30, 30), false);
        send(80, Point::new(31, 31), true);
        send(30, Point::new(31, 31), false);
        // Sender drops here; the loop drains and exits.
    });

    let mut d = Dispatcher::default();
    loop {
        // Block on the next sample, capped by the next pending deadline.
        let wait = d
            .next_deadline()
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(clock.now_ms())))
            .unwrap_or(Duration::from_secs(5));

        match rx.recv_timeout(wait) {
            Ok(sample) => d.submit(sample).unwrap(),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        d.advance(clock.now_ms());
        for ev in d.drain() {
            println!("t={:<6} {:?}", ev.timestamp, ev.kind);
        }
    }

    d.advance(clock.now_ms() + 1000);
    for ev in d.drain() {
        println!("t={:<6} {:?}", ev.timestamp, ev.kind);
    }
    driver.join().unwrap();
}
