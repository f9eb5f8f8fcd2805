#![no_main]
use libfuzzer_sys::fuzz_target;
use varpack::io as record;

fuzz_target!(|data: &[u8]| {
    // Memory and streaming decoders must agree on every input.
    let memory = record::decode_record(data);
    let streamed = record::read_record(&mut &data[..]);
    match (memory, streamed) {
        (Ok((values, consumed)), Ok(s)) => {
            assert_eq!(values, s);
            assert!(record::encode_record(&values).len() <= consumed);
        }
        (Err(_), Err(_)) => {}
        (m, s) => panic!("decoders disagree: {m:?} vs {s:?}"),
    }
});
