//! Structural invariants of `SinglyLinkedList`.

use std::ptr;

use super::error::InvariantViolation;
use super::linked_list::SinglyLinkedList;

pub trait Invariant<T> {
    /// Short identifier used in violation reports.
    fn name(&self) -> &'static str;

    fn check(&self, value: &T) -> bool;
}

/// `len` equals the number of nodes reachable from `head`.
pub struct LengthMatchesReachable;

impl<T> Invariant<SinglyLinkedList<T>> for LengthMatchesReachable {
    fn name(&self) -> &'static str {
        "length_matches_reachable"
    }

    fn check(&self, list: &SinglyLinkedList<T>) -> bool {
        let walk = list.walk(list.len().saturating_add(1));
        walk.terminated && walk.steps == list.len()
    }
}

/// Nothing follows the tail, and the tail is the last reachable node.
pub struct TailTerminates;

impl<T> Invariant<SinglyLinkedList<T>> for TailTerminates {
    fn name(&self) -> &'static str {
        "tail_terminates"
    }

    fn check(&self, list: &SinglyLinkedList<T>) -> bool {
        let last = list.walk(list.len()).last;
        match (list.tail_node(), last) {
            (Some(tail), Some(last)) => tail.next().is_none() && ptr::eq(tail, last),
            (None, None) => true,
            _ => false,
        }
    }
}

/// `head` and `tail` are both absent exactly when the list is empty.
pub struct HeadTailPresence;

impl<T> Invariant<SinglyLinkedList<T>> for HeadTailPresence {
    fn name(&self) -> &'static str {
        "head_tail_presence"
    }

    fn check(&self, list: &SinglyLinkedList<T>) -> bool {
        let empty = list.is_empty();
        list.head_node().is_none() == empty && list.tail_node().is_none() == empty
    }
}

/// Traversal from `head` ends within `len` steps.
pub struct Acyclic;

impl<T> Invariant<SinglyLinkedList<T>> for Acyclic {
    fn name(&self) -> &'static str {
        "acyclic"
    }

    fn check(&self, list: &SinglyLinkedList<T>) -> bool {
        list.walk(list.len()).terminated
    }
}

pub(crate) fn verify<T, I>(invariant: &I, list: &SinglyLinkedList<T>) -> Result<(), InvariantViolation>
where
    I: Invariant<SinglyLinkedList<T>>,
{
    if invariant.check(list) {
        Ok(())
    } else {
        Err(InvariantViolation::new(invariant.name(), list.len()))
    }
}
