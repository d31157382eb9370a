#![no_main]

use flif_core::bytestream::ByteCursor;
use flif_maniac::{MetaPropertySymbolCoder, PropertySymbolCoder, RacDecoder};
use libfuzzer_sys::fuzz_target;

// arbitrary bytes must decode to a tree or a clean error, never a
// panic; a decoded tree must then survive a short data section
fuzz_target!(|data: &[u8]| {
    let ranges = [(0, 15), (-8, 8)];

    let mut rac = match RacDecoder::new(ByteCursor::new(data)) {
        Ok(rac) => rac,
        Err(_) => return
    };
    let tree = match MetaPropertySymbolCoder::new(&ranges).read_tree(&mut rac) {
        Ok(tree) => tree,
        Err(_) => return
    };

    let mut coder = PropertySymbolCoder::new(&ranges, tree);
    for i in 0..64_i32 {
        let properties = [i % 16, (i % 17) - 8];
        if coder.read_int(&mut rac, &properties, -100, 100).is_err() {
            return;
        }
    }
});
