use criterion::{criterion_group, criterion_main, Criterion};
use ext4_monitor::{
    render_json, DiskUsage, HealthStatus, JsonStyle, PartitionStatus, Report,
};

fn sample_report(n: usize) -> Report {
    let partitions = (0..n)
        .map(|i| PartitionStatus {
            device: format!("/dev/sd{}1", (b'a' + (i % 26) as u8) as char),
            status: if i % 3 == 0 {
                HealthStatus::NeedsRepair
            } else {
                HealthStatus::Healthy
            },
            check_output: format!("/dev/sd{i}: clean, 11/655360 files, 66753/2621440 blocks\n"),
            disk_usage: DiskUsage {
                size: "20G".into(),
                used: "12G".into(),
                available: "7.1G".into(),
                usage_percent: "63%".into(),
            },
            last_checked: "2024-05-01T10:00:00Z".into(),
        })
        .collect();
    Report {
        timestamp: "2024-05-01T10:00:00Z".into(),
        fs_type: "ext4".into(),
        partitions,
        failures: Vec::new(),
    }
}

fn bench_render(c: &mut Criterion) {
    let report = sample_report(32);
    c.bench_function("render_json_pretty", |b| {
        b.iter(|| render_json(&report, JsonStyle::Pretty))
    });
    c.bench_function("render_json_compact", |b| {
        b.iter(|| render_json(&report, JsonStyle::Compact))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
