//! Import pipeline benchmarks
//!
//! 1. NORMALIZATION: playbooks with 10/100/1000 tasks
//! 2. IMPORT RESOLUTION: flat and nested `import:` trees
//! 3. SCRIPT SPLITTING: scripts with mixed special lines
//! 4. RENDERING: canonical playbooks back to YAML

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;
use tempfile::TempDir;

use ansible_builder::import::ImportResolver;
use ansible_builder::normalize::Normalizer;
use ansible_builder::playbook::{CanonicalPlaybook, CanonicalTask};
use ansible_builder::render::YamlRenderer;
use ansible_builder::script::ScriptSplitter;

// ============================================================================
// DATA GENERATORS
// ============================================================================

/// Generate a one-play playbook with `count` tasks of mixed shapes
fn generate_playbook_yaml(count: usize) -> String {
    let mut yaml = String::from("- name: Bench\n  hosts: all\n  become: true\n  tasks:\n");
    for i in 0..count {
        match i % 4 {
            0 => yaml.push_str(&format!("    - name: Install {i}\n      apt: pkg{i}\n")),
            1 => yaml.push_str(&format!(
                "    - name: Template {i}\n      ansible.builtin.template:\n        src: t{i}.j2\n        dest: /etc/t{i}\n      notify: restart\n"
            )),
            2 => yaml.push_str(&format!(
                "    - name: Shell {i}\n      shell: echo {i}\n      register: out{i}\n      when: out{i} is defined\n"
            )),
            _ => yaml.push_str(&format!(
                "    - name: Loop {i}\n      debug:\n        msg: \"{{{{ item }}}}\"\n      loop: [a, b, c]\n"
            )),
        }
    }
    yaml
}

/// Generate a script with `blocks` comment-delimited blocks
fn generate_script(blocks: usize) -> String {
    let mut script = String::from("#!/bin/bash\n");
    for i in 0..blocks {
        script.push_str(&format!("# Step {i}\n"));
        script.push_str(&format!("cd /srv/app{i}\n./configure --prefix=/opt/{i}\nmake -j4\n"));
        if i % 3 == 0 {
            script.push_str(&format!("apt-get install -y lib{i} tool{i}\n"));
        }
        if i % 5 == 0 {
            script.push_str(&format!("mkdir -p /var/lib/app{i}\nsystemctl enable app{i}\n"));
        }
        script.push('\n');
    }
    script
}

/// Generate a canonical playbook with `count` tasks
fn generate_canonical(count: usize) -> CanonicalPlaybook {
    let mut playbook = CanonicalPlaybook::new("Bench").with_become(true);
    for i in 0..count {
        playbook.add_task(
            CanonicalTask::new(format!("Copy {i}"), "copy")
                .with_param("src", format!("files/{i}"))
                .with_param("dest", format!("/etc/app/{i}"))
                .with_param("backup", "false"),
        );
    }
    playbook
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_normalize_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = Normalizer::new();

    for count in [10, 100, 1000] {
        let yaml = generate_playbook_yaml(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &yaml, |b, yaml| {
            b.iter(|| normalizer.normalize_str(black_box(yaml)).unwrap())
        });
    }

    group.finish();
}

fn bench_import_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("import_resolution");
    let dir = TempDir::new().unwrap();
    let resolver = ImportResolver::new();

    for i in 0..20 {
        fs::write(
            dir.path().join(format!("leaf{i}.yml")),
            format!("- name: Leaf {i}\n  ping: {{}}\n"),
        )
        .unwrap();
    }
    let flat: String = (0..20).map(|i| format!("- import: leaf{i}.yml\n")).collect();

    // Each level imports the next, ending at a leaf
    for depth in 0..8 {
        let next = if depth == 7 {
            "leaf0.yml".to_string()
        } else {
            format!("level{}.yml", depth + 1)
        };
        fs::write(
            dir.path().join(format!("level{depth}.yml")),
            format!("- import: {next}\n"),
        )
        .unwrap();
    }

    group.bench_function("flat_20", |b| {
        b.iter(|| resolver.resolve(black_box(&flat), dir.path()))
    });
    group.bench_function("nested_8", |b| {
        b.iter(|| resolver.resolve(black_box("- import: level0.yml\n"), dir.path()))
    });
    group.bench_function("no_directives", |b| {
        let yaml = generate_playbook_yaml(100);
        b.iter(|| resolver.resolve(black_box(&yaml), dir.path()))
    });

    group.finish();
}

fn bench_script_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("script_split");
    let splitter = ScriptSplitter::new();

    for blocks in [10, 100] {
        let script = generate_script(blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &script, |b, script| {
            b.iter(|| splitter.split(black_box(script)).unwrap())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let renderer = YamlRenderer::new();

    for count in [10, 100, 1000] {
        let playbook = generate_canonical(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &playbook, |b, playbook| {
            b.iter(|| renderer.render(black_box(playbook)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    pipeline_benches,
    bench_normalize_scaling,
    bench_import_resolution,
    bench_script_split,
    bench_render,
);

criterion_main!(pipeline_benches);
