#![no_main]

use emstat::histogram::aggregate;
use emstat::loader::RecordLoader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte stream either fails cleanly or aggregates into fixed-shape histograms
    if let Ok(loaded) = RecordLoader::default().load_reader(data) {
        let summary = aggregate(&loaded.records);
        assert_eq!(summary.hour.as_slice().len(), 24);
        assert_eq!(summary.weekday.total(), summary.counted);
    }
});
