use roaring16::prelude::*;

fn main() {
    // A set that's almost the whole universe naturally lands in the inverted-array
    // encoding, so it stays small even near cardinality 65536.
    let mut nearly_everything = RoaringContainer::new();
    for item in 0u32..=65530 {
        nearly_everything.add(item as u16).unwrap();
    }
    println!("cardinality = {}", nearly_everything.cardinality());

    let mut complement = RoaringContainer::new();
    nearly_everything.invert(&mut complement).unwrap();
    println!("complement cardinality = {}", complement.cardinality());
    for item in 65531u16..=65535 {
        assert!(complement.contains(item));
    }

    let mut back = RoaringContainer::new();
    complement.invert(&mut back).unwrap();
    assert_eq!(nearly_everything, back);
    println!("double invert recovered the original set");
}
