use roaring16::prelude::*;

fn main() {
    let mut set = RoaringContainer::new();
    for item in [3u16, 1000, 1000, 65535] {
        set.add(item).unwrap();
    }
    println!("cardinality = {}", set.cardinality());
    println!("contains(1000) = {}", set.contains(1000));
    println!("contains(42) = {}", set.contains(42));

    let bytes = set.as_bytes();
    println!("serialized to {} bytes", bytes.len());
    let restored = RoaringContainer::import(&bytes).unwrap();
    assert_eq!(set, restored);
    println!("round-tripped through bytes successfully");
}
