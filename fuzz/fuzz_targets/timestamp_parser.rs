#![no_main]

use emstat::timestamp::TimestampParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Incident time cells come straight from untrusted CSV exports
    if let Ok(input) = std::str::from_utf8(data) {
        let parser = TimestampParser::with_formats(["%d.%m.%Y %H:%M"]);
        let _ = parser.parse(input);
    }
});
