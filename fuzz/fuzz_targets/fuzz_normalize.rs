//! Fuzz target for playbook normalization.
//!
//! Feeds arbitrary text through parse, normalize and render. Any document that
//! normalizes must render, and the rendered YAML must parse again.

#![no_main]

use ansible_builder::normalize::Normalizer;
use ansible_builder::render::YamlRenderer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let normalizer = Normalizer::new();
    let Ok(normalized) = normalizer.normalize_str(text) else {
        return;
    };

    let playbook = normalized.into_playbook(|| "fuzz".to_string());
    let yaml = YamlRenderer::new()
        .render(&playbook)
        .expect("canonical playbooks always render");
    serde_yaml::from_str::<serde_yaml::Value>(&yaml).expect("rendered YAML parses");
    let _ = normalizer.normalize_str(&yaml);
});
