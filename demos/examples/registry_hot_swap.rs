// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live resource replacement.
//!
//! A reader thread keeps resolving a font handle while the main thread
//! hot-swaps the payload and finally removes it. The reader sees each
//! version whole, then an explicit Gone — no restart, no torn reads.
//!
//! Run:
//! - `cargo run -p gemini_demos --example registry_hot_swap`

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gemini_registry::{FontData, Registry, Resolved, ResourceData};

fn strike(height: u16) -> ResourceData {
    ResourceData::Font(FontData {
        height,
        ascender: height - 2,
        bits: vec![0xFFFF; height as usize],
        left_edges: (0..=96).map(|g| g * 6).collect(),
    })
}

fn main() {
    let reg = Arc::new(Registry::new());
    let h = reg.register(strike(8)).unwrap();
    println!("registered font {h}");

    let reader_reg = Arc::clone(&reg);
    let reader = thread::spawn(move || {
        let mut last_height = 0;
        loop {
            match reader_reg.resolve(h) {
                Resolved::Live(data) => {
                    let ResourceData::Font(f) = &*data else {
                        unreachable!("kind is immutable");
                    };
                    if f.height != last_height {
                        println!("reader sees font height {}", f.height);
                        last_height = f.height;
                    }
                }
                Resolved::Gone => {
                    println!("reader sees Gone, stopping");
                    return;
                }
            }
            thread::sleep(Duration::from_millis(1));
        }
    });

    // Hot-swap the font a few times while the reader keeps resolving.
    for height in [12, 16, 24] {
        thread::sleep(Duration::from_millis(20));
        reg.replace(h, strike(height)).unwrap();
        println!("replaced with height {height}");
    }

    thread::sleep(Duration::from_millis(20));
    reg.remove(h).unwrap();
    reader.join().unwrap();

    // The handle stays dead forever; new registrations get fresh handles.
    assert!(reg.resolve(h).is_gone());
    let fresh = reg.register(strike(8)).unwrap();
    println!("new registration got a different handle: {fresh}");
    assert_ne!(fresh, h);
}
