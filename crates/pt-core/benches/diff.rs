use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pt_core::{diff_lines, render_diff_page};

fn manifest(builds: usize, bump_every: usize, seed: usize) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<manifest>\n");
    for idx in 0..builds {
        let revision = if idx % bump_every == 0 { idx + seed } else { idx };
        out.push_str(&format!(
            "  <project name=\"component-{idx}\" path=\"external/component-{idx}\" revision=\"{revision:040x}\"/>\n"
        ));
    }
    out.push_str("</manifest>\n");
    out
}

fn bench_diff(c: &mut Criterion) {
    let old = manifest(1500, 40, 0);
    let new = manifest(1500, 40, 7);
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();

    c.bench_function("diff_lines/1500", |b| {
        b.iter(|| diff_lines(black_box(old_lines.as_slice()), black_box(new_lines.as_slice())))
    });

    c.bench_function("render_diff_page/1500", |b| {
        b.iter(|| render_diff_page("100", "101", black_box(&old), black_box(&new)))
    });
}

criterion_group!(benches, bench_diff);
criterion_main!(benches);
