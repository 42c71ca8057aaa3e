#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);

    let all = multer_mixed::parse_entries(&body, "X-BOUNDARY", 0);
    for skip in 0..=all.len() {
        let rest = multer_mixed::parse_entries(&body, "X-BOUNDARY", skip);
        assert_eq!(rest.len(), all.len() - skip);
    }
});
