#![no_main]

use figment::Figment;
use figment::providers::{Format, Serialized, Yaml};
use libfuzzer_sys::fuzz_target;
use pep_client::PepClientConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Figment::from(Serialized::defaults(PepClientConfig::default()))
            .merge(Yaml::string(s))
            .extract::<PepClientConfig>();
    }
});
