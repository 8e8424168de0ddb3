// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher basics.
//!
//! Feeds a scripted sample stream through the classifier and prints the
//! resulting events: a single click (resolved by its deadline), a double
//! click (resolved by the second release), and a drag.
//!
//! Run:
//! - `cargo run -p gemini_demos --example dispatcher_basics`

use gemini_input::{Dispatcher, Point, RawSample, PRIMARY};

fn main() {
    let mut d = Dispatcher::default();

    // A lone press/release pair: nothing emits until the window expires.
    d.submit(RawSample::press(PRIMARY, 0, Point::new(10, 10))).unwrap();
    d.submit(RawSample::release(PRIMARY, 40, Point::new(10, 10))).unwrap();
    println!("after first pair, deadline = {:?}", d.next_deadline());

    // A chained pair well inside the window and tolerance: double click.
    d.submit(RawSample::press(PRIMARY, 600, Point::new(200, 100))).unwrap();
    d.submit(RawSample::release(PRIMARY, 630, Point::new(200, 100))).unwrap();
    d.submit(RawSample::press(PRIMARY, 700, Point::new(201, 101))).unwrap();
    d.submit(RawSample::release(PRIMARY, 730, Point::new(201, 101))).unwrap();

    // A press that moves: drag, no click classification at all.
    d.submit(RawSample::press(PRIMARY, 1500, Point::new(50, 50))).unwrap();
    d.submit(RawSample::motion(PRIMARY, 1520, Point::new(80, 50))).unwrap();
    d.submit(RawSample::motion(PRIMARY, 1540, Point::new(120, 50))).unwrap();
    d.submit(RawSample::release(PRIMARY, 1560, Point::new(150, 50))).unwrap();

    // Resolve everything time-driven that is still outstanding.
    d.advance(5000);

    println!("== Classified events ==");
    for ev in d.drain() {
        println!("  t={:<5} {:?}", ev.timestamp, ev.kind);
    }
}
