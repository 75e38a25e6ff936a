#![no_main]
use libfuzzer_sys::fuzz_target;
use roaring16::RoaringContainer;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either import cleanly or come back as `RoaringError::Malformed`,
    // never a panic or an out-of-bounds read.
    let _ = RoaringContainer::import(data);
});
