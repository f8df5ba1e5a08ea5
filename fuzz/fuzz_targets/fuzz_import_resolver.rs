//! Fuzz target for `import:` directive resolution.
//!
//! Builds a small directory of files whose contents and names come from the
//! fuzzer, then resolves a document against it. Resolution must terminate and
//! must never splice in a file from outside the base directory.

#![no_main]

use ansible_builder::import::ImportResolver;
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::fs;

const SECRET: &str = "outside-the-base-directory";

#[derive(Debug, Arbitrary)]
struct FuzzTree {
    root: String,
    files: Vec<(u8, String)>,
    detect_cycles: bool,
    max_passes: u8,
}

fuzz_target!(|input: FuzzTree| {
    let Ok(outer) = tempfile::TempDir::new() else {
        return;
    };
    let base = outer.path().join("base");
    if fs::create_dir(&base).is_err() || fs::write(outer.path().join("secret.yml"), SECRET).is_err() {
        return;
    }

    for (index, content) in input.files.iter().take(8) {
        let _ = fs::write(base.join(format!("f{}.yml", index % 8)), content);
    }

    let resolver = ImportResolver::new()
        .with_cycle_detection(input.detect_cycles)
        .with_max_passes(usize::from(input.max_passes % 12));
    let resolution = resolver.resolve_with_report(&input.root, &base);

    let fuzzed_secret = input.root.contains(SECRET)
        || input.files.iter().any(|(_, content)| content.contains(SECRET));
    if !fuzzed_secret {
        assert!(!resolution.content.contains(SECRET));
    }
});
