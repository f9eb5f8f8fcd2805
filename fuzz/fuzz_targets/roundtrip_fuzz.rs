#![no_main]
use libfuzzer_sys::fuzz_target;
use varpack::codec::{fixed, varint};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let mut word = [0u8; 8];
    word.copy_from_slice(&data[..8]);
    let long = i64::from_le_bytes(word);
    let int = long as i32;

    let enc = varint::encode_varlong(long);
    assert_eq!(enc.len(), varint::size_of_varlong(long));
    assert_eq!(varint::decode_varlong(&enc).unwrap(), (long, enc.len()));

    let enc = varint::encode_varint(int);
    assert_eq!(enc.len(), varint::size_of_varint(int));
    assert_eq!(varint::decode_varint(&enc).unwrap(), (int, enc.len()));

    let mut buf = data[8..].to_vec();
    let offset = usize::from(data[0]);
    match fixed::write_u32_be(&mut buf, offset, int as u32) {
        Ok(()) => assert_eq!(fixed::read_u32_be(&buf, offset).unwrap(), int as u32),
        Err(_) => assert_eq!(buf, &data[8..]),
    }
});
