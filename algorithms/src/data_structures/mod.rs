//! Core structural containers.

pub mod error;
pub mod invariant;
pub mod linked_list;

pub use error::{InvariantViolation, ListError};
pub use invariant::Invariant;
pub use linked_list::{IntoIter, Iter, IterMut, Node, SinglyLinkedList};
