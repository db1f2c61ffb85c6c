//! Walks through every list operation and prints the resulting sequence.
//!
//! Run with:
//!   RUST_LOG=trace cargo run --example linked_list_walkthrough

use algorithms::data_structures::{ListError, SinglyLinkedList};

fn main() -> Result<(), ListError> {
    env_logger::init();

    println!("=== Singly Linked List ===");

    let mut list = SinglyLinkedList::with_value(10);
    list.append(5).append(16);
    println!("append 5, 16        : {:?}", list);

    list.prepend(1);
    println!("prepend 1           : {:?}", list);

    list.insert(2, 99);
    println!("insert(2, 99)       : {:?}", list);

    list.remove(2)?;
    println!("remove(2)           : {:?}", list);

    println!("traverse_to_index(1): {:?}", list.traverse_to_index(1)?.value());
    println!("reverse             : {:?}", list.reverse());
    println!("head / tail         : {:?} / {:?}", list.head(), list.tail());

    match list.remove(list.len() - 1) {
        Ok(_) => println!("unexpected removal past the tail"),
        Err(err) => println!("remove past tail    : {}", err),
    }

    list.check_invariants()
        .map(|()| println!("invariants          : ok"))
        .unwrap_or_else(|violation| println!("invariants          : {}", violation));

    Ok(())
}
