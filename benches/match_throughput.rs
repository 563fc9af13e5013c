use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use trierouter::context::RequestContext;
use trierouter::executor::{Executor, FnExecutor};
use trierouter::router::Node;
use trierouter::tree::RouteTree;

fn exec(name: &'static str) -> Arc<dyn Executor> {
    Arc::new(FnExecutor::new(name, |_| Ok(())))
}

fn node(exp: &str, keys: &[&str]) -> Node {
    Node::for_pattern(exp, keys).expect("valid pattern")
}

/// /zoo/animals/{id}
/// /zoo/animals/{id}/toys/{toy_id}
/// /zoo/{category}/animals/{id}/habitats/{habitat_id}
/// /static/{file:.*}
fn zoo_tree() -> RouteTree {
    let animal = node("^([0-9]+)$", &["id"])
        .with_executor(exec("get_animal"))
        .with_child(
            node("^toys$", &[])
                .with_child(node("^([0-9]+)$", &["toy_id"]).with_executor(exec("animal_toy"))),
        );
    let zoo = node("^zoo$", &[])
        .with_child(node("^animals$", &[]).with_child(animal))
        .with_child(
            node("^(cats|dogs|birds)$", &["category"]).with_child(
                node("^animals$", &[]).with_child(node("^([0-9]+)$", &["id"]).with_child(
                    node("^habitats$", &[]).with_child(
                        node("^([0-9]+)$", &["habitat_id"]).with_executor(exec("habitat")),
                    ),
                )),
            ),
        );
    let assets = node("^static$", &[])
        .with_child(node(".*", &["file"]).with_executor(exec("static_file")));

    let mut tree = RouteTree::new();
    tree.add(zoo).expect("zoo routes");
    tree.add(assets).expect("static routes");
    tree
}

fn bench_match_throughput(c: &mut Criterion) {
    let tree = zoo_tree();
    let ctx = RequestContext::new();
    c.bench_function("route_match", |b| {
        let test_paths = [
            "/zoo/animals/123",
            "/zoo/animals/123/toys/456",
            "/zoo/cats/animals/123/habitats/88",
            "/static/app.min.js",
            "/zoo/unknown",
        ];
        b.iter(|| {
            for path in test_paths.iter() {
                let res = tree.resolve(&ctx, path);
                black_box(&res);
            }
        })
    });
}

criterion_group!(benches, bench_match_throughput);
criterion_main!(benches);
