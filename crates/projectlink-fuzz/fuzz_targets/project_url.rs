#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use projectlink_core::project::parse_project_url;

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(parsed) = parse_project_url(text) {
            assert!(!parsed.owner_name.is_empty());
            assert!(!parsed.owner_name.contains('/'));
        }
    }
});
