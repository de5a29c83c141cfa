use criterion::{criterion_group, criterion_main, Criterion};
use getjson::demo::{registry, DemoController};
use getjson::dispatcher::Dispatcher;
use getjson::router::Router;
use getjson::JsonValue;
use std::hint::black_box;

fn zoo_router() -> Router {
    Router::new(
        "api",
        [
            ("root_handler", "/"),
            ("get_animals", "zoo/animals"),
            ("get_animal", "zoo/animals/{id}"),
            ("animal_toy", "zoo/animals/{id}/toys/{toy_id}"),
            (
                "habitat_section",
                "zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}",
            ),
            ("complex_many_params", "complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}"),
            ("health_check", "zoo/health"),
        ],
    )
    .unwrap()
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = zoo_router();
    c.bench_function("route_match", |b| {
        let test_paths = [
            "/api/zoo/animals/123",
            "/api/zoo/animals/123/toys/456",
            "/api/zoo/cats/animals/123/habitats/88/sections/5",
            "/api/complex/1/2/3/4/5/6/7/8/9",
            "/api/zoo/missing",
        ];
        b.iter(|| {
            for path in &test_paths {
                black_box(router.route(black_box(path)));
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(DemoController::default(), registry()).unwrap();
    c.bench_function("dispatch_args", |b| {
        b.iter(|| black_box(dispatcher.dispatch("GET", "/api/args", Some("n=3&text=Ha"))))
    });
    c.bench_function("dispatch_filter", |b| {
        b.iter(|| black_box(dispatcher.dispatch("GET", "/api/filter", Some("op=gt&value=1"))))
    });
}

fn bench_render(c: &mut Criterion) {
    let row = |i: i64| {
        JsonValue::object([
            ("id", JsonValue::from(i)),
            ("name", JsonValue::from(format!("item-{i}"))),
            ("score", JsonValue::from(i as f64 / 4.0)),
            ("tags", JsonValue::array(["a", "b", "c"])),
        ])
    };
    let document = JsonValue::object([("rows", JsonValue::Array((0..200).map(row).collect()))]);
    c.bench_function("render_document", |b| b.iter(|| black_box(document.render(0))));
}

criterion_group!(benches, bench_route_throughput, bench_dispatch, bench_render);
criterion_main!(benches);
