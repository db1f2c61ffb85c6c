//! # Algorithms Crate
//!
//! Data-structure exercises from a computer-science learning portfolio.
//!
//! ## Modules
//!
//! - `data_structures` – Singly linked list with positional mutation and
//!   in-place reversal, plus its structural invariant checks
//!
//! ---
//!
//! ## Usage Example
//!
//! ```rust
//! use algorithms::data_structures::SinglyLinkedList;
//!
//! let mut list = SinglyLinkedList::with_value(10);
//! list.append(5).append(16);
//! assert_eq!(list.reverse(), vec![16, 5, 10]);
//! ```
//!
//! ---
//!
//! Enable the `serde` feature to (de)serialize lists as plain sequences.

pub mod data_structures;

pub use data_structures::{ListError, SinglyLinkedList};
