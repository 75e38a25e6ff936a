#![no_main]
use libfuzzer_sys::fuzz_target;
use roaring16::RoaringContainer;

fn items_from(data: &[u8]) -> Vec<u16> {
    data.chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let items = items_from(data);
    let set = match RoaringContainer::from_items(items) {
        Ok(set) => set,
        Err(_) => return,
    };

    let bytes = set.as_bytes();
    assert_eq!(bytes.len(), set.length());
    let restored = RoaringContainer::import(&bytes).expect("our own export must re-import");
    assert_eq!(set, restored);
});
