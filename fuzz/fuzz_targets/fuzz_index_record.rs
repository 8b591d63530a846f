#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Any line an index may contain parses or is skipped, never panics
    let _ = wordhunt::index::reader::parse_record(data);

    let reader = wordhunt::index::reader::IndexReader::new(data.as_bytes(), "fuzz");
    for entry in reader.take(64) {
        let _ = entry;
    }
});
