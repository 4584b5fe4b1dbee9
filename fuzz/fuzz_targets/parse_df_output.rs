#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        use ext4_monitor::internals::{
            parse_df_output_for_tests, partitions_from_mountinfo_for_tests,
        };

        let _ = parse_df_output_for_tests(text);
        let _ = partitions_from_mountinfo_for_tests(text, "ext4");
    }
});
