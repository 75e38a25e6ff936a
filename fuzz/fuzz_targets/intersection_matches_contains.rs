#![no_main]
use libfuzzer_sys::fuzz_target;
use roaring16::RoaringContainer;
use std::collections::HashSet;

fn items_from(data: &[u8]) -> Vec<u16> {
    data.chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let split = data.len() / 2;
    let items_a = items_from(&data[..split]);
    let items_b = items_from(&data[split..]);

    let set_a = match RoaringContainer::from_items(items_a.clone()) {
        Ok(set) => set,
        Err(_) => return,
    };
    let set_b = match RoaringContainer::from_items(items_b.clone()) {
        Ok(set) => set,
        Err(_) => return,
    };

    let mut intersected = RoaringContainer::new();
    RoaringContainer::intersection(&set_a, &set_b, &mut intersected)
        .expect("non-aliased intersection cannot fail");

    let expected: HashSet<u16> = items_a
        .into_iter()
        .collect::<HashSet<_>>()
        .intersection(&items_b.into_iter().collect::<HashSet<_>>())
        .copied()
        .collect();

    assert_eq!(intersected.cardinality() as usize, expected.len());
    for item in expected {
        assert!(intersected.contains(item));
    }
});
