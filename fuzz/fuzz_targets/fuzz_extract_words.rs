#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Folding and splitting must never panic on arbitrary text
    let words = wordhunt::utils::extract_words(data, false, true);
    let required: Vec<String> = words.iter().take(4).cloned().collect();
    assert!(wordhunt::utils::matches_all_words(data, &required, false, true));
    assert!(wordhunt::utils::strip_matching_words(&required, data, false, true).is_empty());
});
