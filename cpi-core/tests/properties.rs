//! Operation-sequence properties of the registry.
//!
//! Each `#[case]` replays a script against a fresh store and checks the
//! invariants after every step.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use cpi_core::{FixedClock, Registry, RegistryStore};
use rstest::rstest;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(&'static str, &'static str),
    Remove(&'static str),
    Mark(&'static str),
}

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[rstest]
#[case::empty(&[])]
#[case::single(&[Op::Add("a", "x")])]
#[case::re_add(&[Op::Add("a", "x"), Op::Add("a", "y"), Op::Add("a", "z")])]
#[case::add_remove(&[Op::Add("a", "x"), Op::Remove("a"), Op::Remove("a")])]
#[case::interleaved(&[
    Op::Add("m", "1"),
    Op::Add("B", "2"),
    Op::Mark("m"),
    Op::Add("c", "3"),
    Op::Remove("B"),
    Op::Add("B", "4"),
    Op::Mark("zz"),
    Op::Remove("nope"),
])]
#[case::unicode(&[Op::Add("projeto-ção", "Casa/Dev"), Op::Add("Ärger", "x"), Op::Add("apple", "y")])]
fn invariants_hold_across_sequences(#[case] ops: &[Op]) {
    let tmp = TempDir::new().unwrap();
    let mut live: BTreeSet<&str> = BTreeSet::new();

    for (step, op) in ops.iter().enumerate() {
        let now = base() + Duration::minutes(step as i64);
        let reg = Registry::with_clock(RegistryStore::at(tmp.path()), FixedClock(now));
        let created_before = reg
            .list_sorted()
            .unwrap()
            .into_iter()
            .map(|p| (p.name.0, p.created))
            .collect::<Vec<_>>();

        match *op {
            Op::Add(name, tag) => {
                reg.upsert(name, tag).unwrap();
                live.insert(name);
                let rec = reg
                    .list_sorted()
                    .unwrap()
                    .into_iter()
                    .find(|p| p.name.0 == name)
                    .expect("record present after upsert");
                assert_eq!(rec.updated, now, "updated must be set to now");
                assert_eq!(rec.tag.0, tag);
                if let Some((_, created)) = created_before.iter().find(|(n, _)| n == name) {
                    assert_eq!(&rec.created, created, "created must never change");
                } else {
                    assert_eq!(rec.created, now);
                }
            }
            Op::Remove(name) => {
                reg.remove(name).unwrap();
                live.remove(name);
            }
            Op::Mark(name) => {
                reg.set_migrated(name).unwrap();
            }
        }

        assert_eq!(reg.count().unwrap(), live.len(), "count after {op:?}");
        let names = reg.names_sorted().unwrap();
        assert!(
            names.windows(2).all(|w| w[0].0 <= w[1].0),
            "list must be sorted: {names:?}"
        );
        let expected: Vec<&str> = live.iter().copied().collect();
        let got: Vec<&str> = names.iter().map(|n| n.0.as_str()).collect();
        assert_eq!(got, expected);
    }
}
