use roaring16::prelude::*;

fn main() {
    let evens = RoaringContainer::from_items((0u16..10_000).step_by(2)).unwrap();
    let multiples_of_seven = RoaringContainer::from_items((0u16..10_000).step_by(7)).unwrap();

    let mut both = RoaringContainer::new();
    RoaringContainer::intersection(&evens, &multiples_of_seven, &mut both).unwrap();

    println!(
        "evens: {}, multiples of 7: {}, multiples of 14: {}",
        evens.cardinality(),
        multiples_of_seven.cardinality(),
        both.cardinality(),
    );
    assert!(both.contains(14));
    assert!(!both.contains(7));
}
