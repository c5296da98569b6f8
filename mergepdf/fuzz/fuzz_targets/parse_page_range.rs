#![no_main]

use libfuzzer_sys::fuzz_target;
use mergepdf::config::PageRange;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let s = std::str::from_utf8(data).unwrap_or("");

    if let Ok(range) = PageRange::parse(s) {
        // Anything that parses is a non-empty, 1-based range.
        assert!(range.start >= 1);
        assert!(range.start <= range.end);
        if range.len() <= 10_000 {
            assert_eq!(range.len() as usize, range.to_indices().count());
        }

        let total = range.end;
        assert!(range.validate(Path::new("fuzz.pdf"), total).is_ok());
        assert!(range.validate(Path::new("fuzz.pdf"), total - 1).is_err());
    }
});
