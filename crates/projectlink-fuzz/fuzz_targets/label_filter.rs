#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use projectlink_core::patterns::LabelFilter;

    if let Ok(text) = std::str::from_utf8(data) {
        // First line: filter list, second: operator, rest: issue labels
        let mut lines = text.lines();
        let raw_list = lines.next().unwrap_or("");
        let raw_operator = lines.next().unwrap_or("");
        let labels: Vec<&str> = lines.take(20).collect();

        let filter = LabelFilter::parse(raw_list, raw_operator);
        let first = filter.matches(labels.as_slice());
        assert_eq!(first, filter.matches(labels.as_slice()));

        if filter.is_empty() {
            assert!(first);
        }
    }
});
