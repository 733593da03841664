#![no_main]

use libfuzzer_sys::fuzz_target;
use pep_hessian::{ByteBuffer, HessianValue};

fuzz_target!(|data: &[u8]| {
    let Ok(mut input) = ByteBuffer::from_slice(data) else {
        return;
    };
    while let Ok(value) = HessianValue::deserialize(&mut input) {
        // Re-encoding a decoded value must be stable
        let Ok(bytes) = value.to_bytes() else {
            continue;
        };
        let again = HessianValue::from_bytes(&bytes).and_then(|v| v.to_bytes());
        assert_eq!(again.ok(), Some(bytes));
    }
});
