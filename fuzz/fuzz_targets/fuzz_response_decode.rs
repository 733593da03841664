#![no_main]

use base64::Engine;
use libfuzzer_sys::fuzz_target;
use pep_client::wire;

fuzz_target!(|data: &[u8]| {
    // Raw input hits the base64 layer, its encoding reaches the Hessian and model layers
    let _ = wire::decode_response(data);

    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    let _ = wire::decode_response(encoded.as_bytes());
});
