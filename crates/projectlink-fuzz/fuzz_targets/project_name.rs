#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use projectlink_core::{derive_project_name, ProjectNameSpec};

    if let Ok(text) = std::str::from_utf8(data) {
        let mut parts = text.splitn(4, '\0');
        let base_branch = parts.next().unwrap_or("");
        let spec = ProjectNameSpec {
            base_branch,
            prefix_remove: parts.next(),
            suffix_remove: parts.next(),
            replace_with_spaces: parts.next(),
        };

        let name = derive_project_name(&spec);
        assert!(name.chars().count() <= base_branch.chars().count());
    }
});
