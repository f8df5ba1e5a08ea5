//! Fuzz target for shell script splitting.
//!
//! Every non-blank script yields at least one task and every task carries a
//! non-empty name and module.

#![no_main]

use ansible_builder::script::ScriptSplitter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|script: String| {
    match ScriptSplitter::new().split(&script) {
        Ok(tasks) => {
            assert!(!tasks.is_empty());
            for task in &tasks {
                assert!(!task.module.is_empty());
            }
        }
        Err(_) => assert!(script.trim().is_empty()),
    }
});
