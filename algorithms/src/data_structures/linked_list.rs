//! Singly-linked list with heap-allocated nodes and a tail pointer.
//!
//! Variables:
//!   head : Option<NonNull<Node<T>>> : first node, None iff N = 0
//!   tail : Option<NonNull<Node<T>>> : last node, None iff N = 0
//!   N    : usize                    : number of nodes
//!
//! Equations:
//!   append(x):    tail.next = new,  tail = new,          N' = N+1   O(1)
//!   prepend(x):   new.next = head,  head = new,          N' = N+1   O(1)
//!   insert(i, x): i = 0 -> prepend, i >= N -> append,
//!                 else leader = node(i-1), new.next = leader.next,
//!                 leader.next = new,                     N' = N+1   O(i)
//!   remove(i):    requires i+1 < N,
//!                 leader = node(i), leader.next = leader.next.next,
//!                 N' = N-1                                          O(i)
//!   reverse():    next(k) = k-1 for every node, swap(head, tail)    O(N)
//!
//! Invariants:
//!   N = |reachable(head)|,  tail.next = None,
//!   head = None <-> tail = None <-> N = 0,  no cycles.
//!
//! Ownership: every node is allocated with `Box::into_raw` and owned by the
//! list as a whole. It is freed with `Box::from_raw` exactly once, when it is
//! unlinked (`pop_front`, `remove`) or the list is dropped. All links are raw
//! pointers, so references handed out by accessors never alias a `Box`.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, trace};

use super::error::{InvariantViolation, ListError};
use super::invariant::{self, Acyclic, HeadTailPresence, LengthMatchesReachable, TailTerminates};

type Link<T> = Option<NonNull<Node<T>>>;

/// One element of the chain. Nodes are only reachable through a list.
pub struct Node<T> {
    value: T,
    next: Link<T>,
}

impl<T> Node<T> {
    fn alloc(value: T, next: Link<T>) -> NonNull<Self> {
        let raw = Box::into_raw(Box::new(Self { value, next }));
        // SAFETY: `Box::into_raw` never returns null.
        unsafe { NonNull::new_unchecked(raw) }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn next(&self) -> Option<&Node<T>> {
        // SAFETY: the successor belongs to the same list as `self`, and a
        // shared node reference is only handed out while the list is
        // borrowed shared, so the successor is live and not mutated.
        self.next.map(|next| unsafe { &*next.as_ptr() })
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

pub struct SinglyLinkedList<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: the list uniquely owns every node, exactly like a `Box` chain would.
unsafe impl<T: Send> Send for SinglyLinkedList<T> {}
unsafe impl<T: Sync> Sync for SinglyLinkedList<T> {}

/// Result of following `next` from `head` for a bounded number of steps.
pub(crate) struct Walk<'a, T> {
    pub(crate) steps: usize,
    pub(crate) last: Option<&'a Node<T>>,
    pub(crate) terminated: bool,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self { head: None, tail: None, len: 0, _owns: PhantomData }
    }

    /// A list seeded with a single value.
    pub fn with_value(value: T) -> Self {
        let mut list = Self::new();
        list.append(value);
        list
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn append(&mut self, value: T) -> &mut Self {
        let node = Node::alloc(value, None);
        match self.tail {
            // SAFETY: `tail` is a live node of this list and `&mut self`
            // rules out any outstanding reference into the chain.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        trace!("append: len={}", self.len);
        self
    }

    pub fn prepend(&mut self, value: T) -> &mut Self {
        let node = Node::alloc(value, self.head);
        self.head = Some(node);
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.len += 1;
        trace!("prepend: len={}", self.len);
        self
    }

    /// Places `value` at position `index`, shifting later elements back.
    /// Indices past the end degrade to `append`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut Self {
        if index == 0 {
            return self.prepend(value);
        }
        if index >= self.len {
            return self.append(value);
        }
        // 0 < index < N: the leader exists and is never the tail.
        let leader = self.node_ptr(index - 1);
        debug_assert!(leader.is_some(), "leader of {} missing in list of {}", index, self.len);
        if let Some(leader) = leader {
            // SAFETY: `leader` is a live node of this list; `&mut self` is
            // exclusive.
            unsafe {
                let node = Node::alloc(value, (*leader.as_ptr()).next);
                (*leader.as_ptr()).next = Some(node);
            }
            self.len += 1;
            trace!("insert at {}: len={}", index, self.len);
        }
        self
    }

    /// Returns the node at `index`.
    pub fn traverse_to_index(&self, index: usize) -> Result<&Node<T>, ListError> {
        let err = ListError::IndexOutOfBounds { index, len: self.len };
        if index >= self.len {
            debug!("traverse_to_index rejected: {}", err);
            return Err(err);
        }
        // SAFETY: nodes of this list live as long as `&self`.
        self.node_ptr(index).map(|node| unsafe { &*node.as_ptr() }).ok_or(err)
    }

    /// Unlinks the node *after* position `index`, i.e. the element at
    /// `index + 1`. The head cannot be removed this way; see `pop_front`.
    pub fn remove(&mut self, index: usize) -> Result<&mut Self, ListError> {
        let err = ListError::IndexOutOfBounds { index, len: self.len };
        if self.len < 2 || index > self.len - 2 {
            debug!("remove rejected: {}", err);
            return Err(err);
        }
        let leader = self.node_ptr(index).ok_or_else(|| err.clone())?;
        // SAFETY: `leader` and its successor are live nodes of this list.
        // The successor is unlinked before its box is reclaimed, so it is
        // freed exactly once and nothing points at it afterwards.
        let removed = unsafe {
            let next = (*leader.as_ptr()).next.ok_or(err)?;
            let removed = Box::from_raw(next.as_ptr());
            (*leader.as_ptr()).next = removed.next;
            removed
        };
        if removed.next.is_none() {
            self.tail = Some(leader);
        }
        self.len -= 1;
        trace!("remove after {}: len={}", index, self.len);
        drop(removed);
        Ok(self)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|head| {
            // SAFETY: `head` was allocated by `Node::alloc` and is unlinked
            // right here, so its box is reclaimed exactly once.
            let node = unsafe { Box::from_raw(head.as_ptr()) };
            self.head = node.next;
            if self.head.is_none() {
                self.tail = None;
            }
            self.len -= 1;
            trace!("pop_front: len={}", self.len);
            node.value
        })
    }

    /// Relinks every node to its predecessor, swapping head and tail.
    pub fn reverse_in_place(&mut self) {
        if self.len < 2 {
            return;
        }
        let mut prev: Link<T> = None;
        let mut cur = self.head;
        while let Some(node) = cur {
            // SAFETY: `node` is a live node of this list; `&mut self` is
            // exclusive.
            unsafe {
                cur = (*node.as_ptr()).next;
                (*node.as_ptr()).next = prev;
            }
            prev = Some(node);
        }
        self.tail = self.head;
        self.head = prev;
        trace!("reverse: len={}", self.len);
    }

    pub fn head(&self) -> Option<&T> {
        self.head_node().map(Node::value)
    }

    pub fn tail(&self) -> Option<&T> {
        self.tail_node().map(Node::value)
    }

    pub fn head_node(&self) -> Option<&Node<T>> {
        // SAFETY: nodes of this list live as long as `&self`.
        self.head.map(|head| unsafe { &*head.as_ptr() })
    }

    pub fn tail_node(&self) -> Option<&Node<T>> {
        // SAFETY: as for `head_node`.
        self.tail.map(|tail| unsafe { &*tail.as_ptr() })
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.traverse_to_index(index).ok().map(Node::value)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: the node is live and `&mut self` makes the returned
        // reference the only one into the chain.
        self.node_ptr(index).map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.head, remaining: self.len, _list: PhantomData }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut { next: self.head, remaining: self.len, _list: PhantomData }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariant::verify(&LengthMatchesReachable, self)?;
        invariant::verify(&TailTerminates, self)?;
        invariant::verify(&HeadTailPresence, self)?;
        invariant::verify(&Acyclic, self)
    }

    pub(crate) fn walk(&self, limit: usize) -> Walk<'_, T> {
        let mut steps = 0;
        let mut last = None;
        let mut cur = self.head_node();
        while let Some(node) = cur {
            if steps == limit {
                return Walk { steps, last, terminated: false };
            }
            steps += 1;
            last = Some(node);
            cur = node.next();
        }
        Walk { steps, last, terminated: true }
    }

    /// Pointer to the node at `index`, walking raw links only.
    fn node_ptr(&self, index: usize) -> Link<T> {
        let mut cur = self.head;
        for _ in 0..index {
            // SAFETY: every link reachable from `head` is a live node.
            cur = cur.and_then(|node| unsafe { (*node.as_ptr()).next });
        }
        cur
    }
}

impl<T: Clone> SinglyLinkedList<T> {
    /// Values from head to tail.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn print_list(&self) -> Vec<T> {
        self.to_vec()
    }

    /// Reverses the chain and returns the resulting order. The mutated list
    /// stays readable through `head`/`tail`.
    pub fn reverse(&mut self) -> Vec<T> {
        self.reverse_in_place();
        self.to_vec()
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> From<Vec<T>> for SinglyLinkedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

pub struct Iter<'a, T> {
    next: Link<T>,
    remaining: usize,
    _list: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.next.map(|node| {
            // SAFETY: the list is borrowed shared for `'a`, so every node
            // stays live and unmodified.
            let node = unsafe { &*node.as_ptr() };
            self.next = node.next;
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    next: Link<T>,
    remaining: usize,
    _list: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.next.map(|node| {
            // SAFETY: the list is borrowed mutably for `'a` and each node is
            // yielded once, so the returned references never overlap.
            unsafe {
                self.next = (*node.as_ptr()).next;
                self.remaining -= 1;
                &mut (*node.as_ptr()).value
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

pub struct IntoIter<T>(SinglyLinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SinglyLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{SeqAccess, Visitor};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::SinglyLinkedList;

    impl<T: Serialize> Serialize for SinglyLinkedList<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self {
                seq.serialize_element(value)?;
            }
            seq.end()
        }
    }

    struct ListVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for ListVisitor<T> {
        type Value = SinglyLinkedList<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a sequence of list values")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut list = SinglyLinkedList::new();
            while let Some(value) = seq.next_element()? {
                list.append(value);
            }
            Ok(list)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for SinglyLinkedList<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(ListVisitor(PhantomData))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_stops_at_limit() {
        let list: SinglyLinkedList<u8> = (1..=5).collect();
        let walk = list.walk(3);
        assert_eq!(walk.steps, 3);
        assert!(!walk.terminated);
        assert_eq!(walk.last.map(Node::value), Some(&3));
    }

    #[test]
    fn walk_reports_last_node() {
        let list: SinglyLinkedList<u8> = (1..=5).collect();
        let walk = list.walk(usize::MAX);
        assert_eq!(walk.steps, 5);
        assert!(walk.terminated);
        assert!(std::ptr::eq(walk.last.unwrap(), list.tail_node().unwrap()));
    }

    #[test]
    fn node_ptr_past_end_is_none() {
        let list = SinglyLinkedList::with_value('a');
        assert_eq!(list.node_ptr(0), list.head);
        assert!(list.node_ptr(1).is_none());
    }

    #[test]
    fn remove_of_last_node_moves_tail_to_leader() {
        let mut list: SinglyLinkedList<i32> = vec![1, 2, 3].into();
        list.remove(1).unwrap();
        assert_eq!(list.tail, list.node_ptr(1));
        assert_eq!(list.tail(), Some(&2));
        list.append(7);
        assert_eq!(list.to_vec(), vec![1, 2, 7]);
    }

    #[test]
    fn reverse_moves_tail_to_old_head() {
        let mut list: SinglyLinkedList<i32> = vec![1, 2, 3].into();
        let old_head = list.head;
        list.reverse_in_place();
        assert_eq!(list.tail, old_head);
        assert_eq!(list.head, list.node_ptr(0));
    }
}
