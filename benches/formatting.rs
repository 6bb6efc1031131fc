use criterion::{Criterion, black_box, criterion_group, criterion_main};
use parafmt::fmt::{self, Placeholders};
use parafmt::{Arg, Message, ParameterizedMessage, SeqKind, SharedSeq, args};

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    group.bench_function("two_placeholders", |b| {
        let mut placeholders = Placeholders::new();
        b.iter(|| placeholders.rescan(black_box("User {} logged in from {}")));
    });

    group.bench_function("escapes", |b| {
        let mut placeholders = Placeholders::new();
        b.iter(|| placeholders.rescan(black_box("path C:\\\\{} and \\{} literal {}")));
    });

    group.bench_function("literal_only", |b| {
        b.iter(|| fmt::count_placeholders(black_box("no placeholders here at all")));
    });

    group.finish();
}

fn bench_substitute(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute");
    let args = args!["alice", "10.0.0.1", 42, 2.5];

    group.bench_function("indexed", |b| {
        let template = "User {} logged in from {} after {} tries ({}s)";
        let mut placeholders = Placeholders::new();
        placeholders.rescan(template);
        let mut buf = String::with_capacity(128);
        b.iter(|| {
            buf.clear();
            fmt::render_to(&mut buf, template, &args, 4, placeholders.indices());
            black_box(&buf);
        });
    });

    group.bench_function("generic", |b| {
        let template = "User {} logged in from {} after {} tries ({}s) \\o/";
        let mut buf = String::with_capacity(128);
        b.iter(|| {
            buf.clear();
            fmt::render_to(&mut buf, template, &args, 4, None);
            black_box(&buf);
        });
    });

    group.finish();
}

fn bench_stringify(c: &mut Criterion) {
    let mut group = c.benchmark_group("stringify");

    let nested = Arg::map([
        ("ids", Arg::list([1, 2, 3, 4])),
        ("names", Arg::set(["a", "b"])),
        ("flag", Arg::from(true)),
    ]);
    group.bench_function("nested_map", |b| {
        let mut buf = String::with_capacity(64);
        b.iter(|| {
            buf.clear();
            fmt::stringify(black_box(&nested), &mut buf);
        });
    });

    let cyclic = SharedSeq::new(SeqKind::List);
    cyclic.push(1);
    cyclic.push(&cyclic);
    let cyclic = Arg::from(cyclic);
    group.bench_function("cyclic_list", |b| {
        let mut buf = String::with_capacity(64);
        b.iter(|| {
            buf.clear();
            fmt::stringify(black_box(&cyclic), &mut buf);
        });
    });

    group.finish();
}

fn bench_parameterized(c: &mut Criterion) {
    c.bench_function("ParameterizedMessage::new+format", |b| {
        b.iter(|| {
            let msg = ParameterizedMessage::new(
                black_box("Retry {} of {}"),
                args![3, 5],
            );
            black_box(msg.formatted_message().len())
        });
    });
}

criterion_group!(
    benches,
    bench_scan,
    bench_substitute,
    bench_stringify,
    bench_parameterized
);
criterion_main!(benches);
