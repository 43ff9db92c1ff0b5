//! Benchmarks for tree resolution.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mindline::sync::{locate_heading, locate_line};
use mindline::tree::{NodeData, OutlineTree};

/// Build a heading tree of the given depth and fanout, with line ranges
/// nested the way the transformer emits them.
fn synthetic_tree(depth: u32, fanout: u32) -> OutlineTree {
    fn node(level: u32, depth: u32, fanout: u32, start: u32, span: u32) -> serde_json::Value {
        let children: Vec<_> = if level < depth {
            (0..fanout)
                .map(|i| {
                    let child_span = span / fanout;
                    node(
                        level + 1,
                        depth,
                        fanout,
                        start + i * child_span,
                        child_span.max(1),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };
        serde_json::json!({
            "content": format!("section {level} at {start}"),
            "payload": {
                "lines": format!("{start},{}", start + span),
                "tag": format!("h{}", (level + 1).min(6))
            },
            "children": children
        })
    }
    let data: NodeData = serde_json::from_value(node(0, depth, fanout, 0, 4096)).unwrap();
    OutlineTree::from_data(data)
}

fn bench_locate_line(c: &mut Criterion) {
    let tree = synthetic_tree(5, 4);
    c.bench_function("locate_line_deep", |b| {
        b.iter(|| locate_line(&tree, black_box(3000)))
    });
    c.bench_function("locate_line_miss", |b| {
        b.iter(|| locate_line(&tree, black_box(100_000)))
    });
}

fn bench_locate_heading(c: &mut Criterion) {
    let tree = synthetic_tree(5, 4);
    c.bench_function("locate_heading_last", |b| {
        b.iter(|| locate_heading(&tree, black_box("section-5-at-4092")))
    });
    c.bench_function("locate_heading_miss", |b| {
        b.iter(|| locate_heading(&tree, black_box("no-such-anchor")))
    });
}

criterion_group!(benches, bench_locate_line, bench_locate_heading);
criterion_main!(benches);
