//! Ranking rules for the notes collection.
//!
//! Notes are split into two partitions by their `pinned` flag. Inside a
//! partition `order` is a zero-based rank; the helpers here allocate,
//! shift and repair those ranks.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entity::Note;
use crate::error::{PinnotesError, Result};

/// Where a newly created note lands in the unpinned partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// After every unpinned note
    #[default]
    Append,
    /// Before every unpinned note, shifting the others down
    Prepend,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::Append => write!(f, "append"),
            Placement::Prepend => write!(f, "prepend"),
        }
    }
}

/// What a pin toggle does to the ranks of both partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PinPolicy {
    /// Flip the flag only; ranks are left as they were
    Flip,
    /// Close the gap left behind and append to the end of the other partition
    #[default]
    Renumber,
}

impl std::fmt::Display for PinPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinPolicy::Flip => write!(f, "flip"),
            PinPolicy::Renumber => write!(f, "renumber"),
        }
    }
}

/// Pinned first, then ascending order, then ascending id
pub fn canonical_cmp(a: &Note, b: &Note) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then(a.order.cmp(&b.order))
        .then(a.id.cmp(&b.id))
}

pub fn sort_canonical(notes: &mut [Note]) {
    notes.sort_by(canonical_cmp);
}

/// `max(id) + 1`, or 1 for an empty collection
pub fn next_id(notes: &[Note]) -> Result<u64> {
    match notes.iter().map(|n| n.id).max() {
        Some(max) => max.checked_add(1).ok_or_else(id_space_exhausted),
        None => Ok(1),
    }
}

/// `max(order) + 1` within the partition, or 0 if it is empty
pub fn next_order(notes: &[Note], pinned: bool) -> Result<u32> {
    let max = notes
        .iter()
        .filter(|n| n.pinned == pinned)
        .map(|n| n.order)
        .max();
    match max {
        Some(max) => max.checked_add(1).ok_or_else(order_space_exhausted),
        None => Ok(0),
    }
}

pub fn partition_len(notes: &[Note], pinned: bool) -> usize {
    notes.iter().filter(|n| n.pinned == pinned).count()
}

/// True when the partition's orders are exactly `0..k`
pub fn is_dense(notes: &[Note], pinned: bool) -> bool {
    let mut orders: Vec<u32> = notes
        .iter()
        .filter(|n| n.pinned == pinned)
        .map(|n| n.order)
        .collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(i, &o)| o as usize == i)
}

/// Decrement every order in the partition greater than `vacated`.
///
/// Returns the number of notes changed.
pub fn close_gap(notes: &mut [Note], pinned: bool, vacated: u32) -> usize {
    let mut changed = 0;
    for note in notes
        .iter_mut()
        .filter(|n| n.pinned == pinned && n.order > vacated)
    {
        note.order -= 1;
        changed += 1;
    }
    changed
}

/// Increment every order in the partition at or after `at`, skipping `except`.
///
/// Fails without touching any note if an order would overflow.
pub fn open_gap(
    notes: &mut [Note],
    pinned: bool,
    at: u32,
    except: Option<u64>,
) -> Result<usize> {
    let shifts = |n: &Note| n.pinned == pinned && n.order >= at && Some(n.id) != except;

    if notes.iter().any(|n| shifts(n) && n.order == u32::MAX) {
        return Err(order_space_exhausted());
    }

    let mut changed = 0;
    for note in notes.iter_mut().filter(|n| shifts(n)) {
        note.order += 1;
        changed += 1;
    }
    Ok(changed)
}

/// Sort canonically, then rank both partitions `0..k` in that order.
///
/// Returns the number of notes whose order changed.
pub fn renumber(notes: &mut [Note]) -> usize {
    sort_canonical(notes);
    let mut next_pinned = 0;
    let mut next_unpinned = 0;
    let mut changed = 0;
    for note in notes.iter_mut() {
        let slot = if note.pinned {
            &mut next_pinned
        } else {
            &mut next_unpinned
        };
        if note.order != *slot {
            note.order = *slot;
            changed += 1;
        }
        *slot += 1;
    }
    changed
}

fn order_space_exhausted() -> PinnotesError {
    PinnotesError::Persistence("order space exhausted".to_string())
}

fn id_space_exhausted() -> PinnotesError {
    PinnotesError::Persistence("id space exhausted".to_string())
}

/// First id that appears more than once
pub fn find_duplicate_id(notes: &[Note]) -> Option<u64> {
    let mut seen = HashSet::with_capacity(notes.len());
    notes.iter().map(|n| n.id).find(|id| !seen.insert(*id))
}
