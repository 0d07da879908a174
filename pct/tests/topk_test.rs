// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

mod common;

use common::ExactTally;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::ge;
use pct::error::ErrorKind;
use pct::recorder::ItemCount;
use pct::recorder::Recorder;
use pct::topk::TopK;
use pct::topk::TopKBuilder;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

fn record_all(top: &mut TopK, items: &[&str]) {
    for item in items {
        top.record(item.as_bytes());
    }
}

fn pairs(ranked: &[ItemCount]) -> Vec<(&str, u64)> {
    ranked
        .iter()
        .map(|row| (row.item_utf8().unwrap(), row.count()))
        .collect()
}

fn assert_ranked(ranked: &[ItemCount]) {
    for pair in ranked.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.count() > b.count() || (a.count() == b.count() && a.item() <= b.item()),
            "out of order: {a:?} before {b:?}"
        );
    }
}

#[test]
fn test_exact_match_small_stream() {
    let mut top = TopK::new(2, 4, 4096);
    record_all(&mut top, &["a", "b", "a", "c", "a", "b"]);
    let ranked = top.top(2).unwrap();
    assert_eq!(pairs(&ranked), [("a", 3), ("b", 2)]);
}

#[test]
fn test_placeholders_fill_unused_slots() {
    let mut top = TopK::new(4, 4, 4096);
    record_all(&mut top, &["x", "y", "x"]);
    let ranked = top.top(4).unwrap();
    assert_eq!(ranked.len(), 4);
    assert_eq!(pairs(&ranked), [("x", 2), ("y", 1), ("", 0), ("", 0)]);
    assert_eq!(top.top_set().num_tracked(), 2);
}

#[test]
fn test_heavy_item_clears_admission_threshold() {
    let mut top = TopK::new(3, 4, 4096);
    for i in 0..100 {
        top.record(format!("singleton {i}").as_bytes());
    }
    for _ in 0..5 {
        top.record(b"repeated");
    }

    let ranked = top.top(3).unwrap();
    let hit = ranked
        .iter()
        .find(|row| row.item() == b"repeated")
        .expect("repeated item must be tracked");
    assert_that!(hit.count(), ge(5u64));
    assert_eq!(ranked[0].item(), b"repeated");
}

#[test]
fn test_readmission_keeps_accumulated_estimate() {
    let mut top = TopK::new(1, 4, 4096);
    record_all(&mut top, &["a", "a", "a"]);
    assert_eq!(pairs(&top.top(1).unwrap()), [("a", 3)]);

    // "b" needs three occurrences to tie "a" and take its slot
    record_all(&mut top, &["b", "b"]);
    assert_eq!(pairs(&top.top(1).unwrap()), [("a", 3)]);
    record_all(&mut top, &["b", "b"]);
    assert_eq!(pairs(&top.top(1).unwrap()), [("b", 4)]);

    // "a" comes back with its sketch estimate, not a fresh count of one
    top.record(b"a");
    assert_eq!(pairs(&top.top(1).unwrap()), [("a", 4)]);
}

#[test]
fn test_snapshot_is_idempotent() {
    let mut top = TopK::new(5, 4, 512);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2_000 {
        top.record(format!("{}", rng.random_range(0..50u32)).as_bytes());
    }
    let first = top.top(5).unwrap();
    let second = top.top(5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_capacity_and_order() {
    let mut rng = StdRng::seed_from_u64(11);
    for k in [1usize, 2, 7, 16] {
        let mut top = TopK::new(k, 5, 256);
        for round in 0..3_000 {
            let id = rng.random_range(0..200u32);
            top.record(format!("item {id}").as_bytes());

            if round % 500 == 0 {
                let ranked = top.top(k).unwrap();
                assert_eq!(ranked.len(), k);
                assert_ranked(&ranked);
            }
        }
        let ranked = top.top(k).unwrap();
        assert_eq!(ranked.len(), k);
        assert_ranked(&ranked);
    }
}

#[test]
fn test_capacity_mismatch_fails() {
    for k in 1..=5usize {
        let mut top = TopK::new(k, 4, 64);
        top.record(b"x");
        for n in (0..=10).filter(|&n| n != k) {
            let err = top.top(n).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
            let display = err.to_string();
            assert_that!(display.as_str(), contains_substring(format!("requested: {n}")));
            assert_that!(display.as_str(), contains_substring(format!("capacity: {k}")));
        }
    }
}

#[test]
fn test_all_fails_loudly() {
    let mut top = TopK::new(3, 4, 64);
    record_all(&mut top, &["a", "b"]);
    let err = top.all().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert_that!(err.message(), contains_substring("cannot list all entries"));
}

#[test]
fn test_builder_validates_config() {
    let err = TopKBuilder::with_size(0, 4, 1024).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

    let top = TopKBuilder::with_accuracy(8, 0.001, 0.99)
        .seed(3)
        .build()
        .unwrap();
    assert_eq!(top.capacity(), 8);
    assert_eq!(top.sketch().seed(), 3);
}

#[test]
fn test_finds_heavy_hitters_among_noise() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut stream: Vec<String> = Vec::new();
    for i in 0..10u32 {
        for _ in 0..(200 + 50 * i) {
            stream.push(format!("heavy {i}"));
        }
    }
    for _ in 0..5_000 {
        stream.push(format!("noise {}", rng.random_range(0..2_000u32)));
    }
    stream.shuffle(&mut rng);

    let mut approximate = TopKBuilder::with_size(10, 5, 4096).build().unwrap();
    let mut exact = ExactTally::default();
    {
        let mut recorders: Vec<&mut dyn Recorder> = vec![&mut approximate, &mut exact];
        for line in &stream {
            for recorder in recorders.iter_mut() {
                recorder.record(line.as_bytes());
            }
        }
    }

    let ranked = approximate.top(10).unwrap();
    assert_ranked(&ranked);

    let mut found: Vec<&str> = ranked.iter().map(|row| row.item_utf8().unwrap()).collect();
    found.sort_unstable();
    let mut expected: Vec<String> = exact
        .top(10)
        .unwrap()
        .iter()
        .map(|row| row.item_utf8().unwrap().to_string())
        .collect();
    expected.sort_unstable();
    assert_eq!(found, expected);

    for row in &ranked {
        assert_that!(row.count(), ge(exact.count(row.item())));
        // stored counts may lag the sketch but never lead it
        assert_that!(approximate.estimate(row.item()), ge(row.count()));
    }
}
