#![no_main]
use libfuzzer_sys::fuzz_target;
use varpack::codec::varint;

fuzz_target!(|data: &[u8]| {
    // Decoders must never panic, only return errors.
    if let Ok((v, n)) = varint::decode_varint(data) {
        assert!(n <= varint::MAX_GROUPS_32);
        // Canonical re-encoding is never longer than the input consumed.
        assert!(varint::size_of_varint(v) <= n);
    }
    if let Ok((v, n)) = varint::decode_varlong(data) {
        assert!(n <= varint::MAX_GROUPS_64);
        assert!(varint::size_of_varlong(v) <= n);
    }

    let mut cursor = std::io::Cursor::new(data);
    while varint::read_varlong(&mut cursor).is_ok() {}
});
