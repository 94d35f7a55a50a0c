//! Binding conflict detection.
//!
//! Two bindings conflict when they live in the same native keymap, are both
//! active, and react to the exact same event. Conflicts are only meaningful
//! inside one host keymap since different keymaps are active in different
//! editor contexts.

use crate::models::{Binding, BindingId, EventDescriptor, NativeHierarchy};
use std::collections::{BTreeSet, HashMap};

/// Returns true if a binding takes part in conflict detection.
fn can_conflict(binding: &Binding) -> bool {
    binding.active && !binding.event.is_unassigned() && binding.event.map_type.can_conflict()
}

/// Ids of bindings sharing an event with another binding of the same keymap.
#[must_use]
pub fn find_conflicts(native: &NativeHierarchy) -> BTreeSet<BindingId> {
    let mut conflicting = BTreeSet::new();

    native.walk(|node| {
        let mut seen: HashMap<&EventDescriptor, BindingId> = HashMap::new();
        for binding in node.bindings.iter().filter(|b| can_conflict(b)) {
            if let Some(first) = seen.get(&binding.event) {
                conflicting.insert(*first);
                conflicting.insert(binding.id);
            } else {
                seen.insert(&binding.event, binding.id);
            }
        }
    });

    conflicting
}
