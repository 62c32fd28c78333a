// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `mapframe_selection` crate.
//!
//! These exercise `SelectionMachine` policies, the cap, the reframe lock, and
//! how the revision counter follows the underlying `Selection`.

use mapframe_selection::{Selection, SelectionMachine, SelectionPolicy, ToggleOutcome, codec};

#[test]
fn empty_selection_basics() {
    let sel = Selection::<u32>::new();
    assert!(sel.is_empty());
    assert_eq!(sel.len(), 0);
    assert_eq!(sel.primary(), None);
    assert_eq!(sel.revision(), 0);
}

#[test]
fn add_sets_primary_and_remove_bumps_revision() {
    let mut sel = Selection::new();
    assert!(sel.add(1));
    assert!(sel.add(2));
    assert_eq!(sel.primary(), Some(&2));
    assert_eq!(sel.revision(), 2);

    assert!(sel.remove(&2));
    assert_eq!(sel.items(), &[1]);
    assert_eq!(sel.primary(), None);
    assert_eq!(sel.revision(), 3);
}

#[test]
fn multi_policy_cap_rejects_third_shape() {
    let mut machine = SelectionMachine::new(SelectionPolicy::Multi, Some(2));
    assert_eq!(machine.toggle("a"), ToggleOutcome::Selected);
    assert_eq!(machine.toggle("b"), ToggleOutcome::Selected);
    let rev = machine.revision();

    assert_eq!(machine.toggle("c"), ToggleOutcome::Rejected { cap: 2 });
    assert_eq!(machine.len(), 2);
    assert!(!machine.contains(&"c"));
    assert_eq!(machine.revision(), rev);

    // Deselecting frees a slot.
    assert_eq!(machine.toggle("a"), ToggleOutcome::Deselected);
    assert_eq!(machine.toggle("c"), ToggleOutcome::Selected);
    assert_eq!(machine.ids(), &["b", "c"]);
}

#[test]
fn single_policy_is_idempotent_per_shape() {
    let mut machine = SelectionMachine::new(SelectionPolicy::Single, None);

    // A then A: empty.
    assert!(machine.toggle("a").wants_reframe());
    let outcome = machine.toggle("a");
    assert_eq!(outcome, ToggleOutcome::Deselected);
    assert!(machine.is_empty());

    // A then B: only B.
    machine.toggle("a");
    let outcome = machine.toggle("b");
    assert_eq!(
        outcome,
        ToggleOutcome::Replaced {
            deselected: vec!["a"]
        }
    );
    assert!(outcome.wants_reframe());
    assert_eq!(machine.ids(), &["b"]);
}

#[test]
fn lock_consumes_toggles_without_mutation() {
    let mut machine = SelectionMachine::default();
    machine.toggle(1_u32);
    machine.lock();
    let rev = machine.revision();

    assert_eq!(machine.toggle(2), ToggleOutcome::Locked);
    assert_eq!(machine.toggle(1), ToggleOutcome::Locked);
    assert_eq!(machine.ids(), &[1]);
    assert_eq!(machine.revision(), rev);

    machine.unlock();
    assert!(!machine.is_locked());
    assert_eq!(machine.toggle(2), ToggleOutcome::Selected);
}

#[test]
fn hydrate_from_text_form() {
    let mut machine = SelectionMachine::<String>::new(SelectionPolicy::Multi, None);
    let outcome = machine.hydrate(codec::decode("click-1,,click-2,click-1"));
    assert!(outcome.changed);
    assert!(outcome.overflow.is_empty());
    assert_eq!(machine.ids(), &["click-1".to_string(), "click-2".to_string()]);

    // Same members in another order is not a change.
    assert!(!machine.hydrate(codec::decode("click-2,click-1")).changed);
    assert_eq!(codec::encode(machine.ids()).as_deref(), Some("click-1,click-2"));
}
