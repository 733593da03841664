#![no_main]

use libfuzzer_sys::fuzz_target;
use pep_hessian::ByteBuffer;
use pep_xacml::{HessianMarshal, Request, Response, read_object, write_object};

/// An object accepted from the wire must survive another write and read unchanged.
fn check_stable<T: HessianMarshal + PartialEq + std::fmt::Debug>(data: &[u8]) {
    let Ok(mut input) = ByteBuffer::from_slice(data) else {
        return;
    };
    let Ok(object) = read_object::<T>(&mut input) else {
        return;
    };
    let mut out = ByteBuffer::new();
    if write_object(&object, &mut out).is_err() {
        return;
    }
    let again = read_object::<T>(&mut out).ok();
    assert_eq!(again.as_ref(), Some(&object));
}

fuzz_target!(|data: &[u8]| {
    check_stable::<Request>(data);
    check_stable::<Response>(data);
});
