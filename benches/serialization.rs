use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use serde_ini::{from_str, to_document, to_string, RenderOptions};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

#[derive(Serialize, Clone)]
struct Service {
    id: u32,
    tags: Vec<String>,
    metadata: Metadata,
    owner: User,
}

fn sample_service() -> Service {
    Service {
        id: 42,
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        owner: User {
            id: 123,
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            active: true,
        },
    }
}

fn generated_document(sections: usize) -> String {
    let mut ini = String::from("# generated\nname = bench\n\n");
    for i in 0..sections {
        ini.push_str(&format!("[Section{}]\n", to_letters(i)));
        ini.push_str(&format!("title = \"section number {}\"\n", i));
        ini.push_str("items[] = one\nitems[] = two\nitems[] = three\n");
        ini.push_str(&format!("lookup[first] = {}\nlookup[second] = '{}'\n\n", i, i * 2));
    }
    ini
}

// Section names are letters only.
fn to_letters(mut n: usize) -> String {
    let mut name = String::new();
    loop {
        name.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            break;
        }
    }
    name
}

fn benchmark_marshal_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("marshal_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_marshal_nested(c: &mut Criterion) {
    let service = sample_service();

    c.bench_function("marshal_nested_struct", |b| {
        b.iter(|| to_string(black_box(&service)))
    });

    c.bench_function("marshal_nested_to_document", |b| {
        b.iter(|| to_document(black_box(&service)))
    });
}

fn benchmark_parse_simple(c: &mut Criterion) {
    let ini = "active = 1\nemail = alice@example.com\nid = 123\nname = Alice\n";

    c.bench_function("parse_simple", |b| b.iter(|| from_str(black_box(ini))));
}

fn benchmark_parse_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_sections");

    for size in [10, 50, 100, 500].iter() {
        let ini = generated_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &ini, |b, ini| {
            b.iter(|| from_str(black_box(ini)))
        });
    }
    group.finish();
}

fn benchmark_render_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_sections");

    for size in [10, 50, 100, 500].iter() {
        let doc = from_str(&generated_document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::new("insertion", size), &doc, |b, doc| {
            b.iter(|| black_box(doc).render())
        });
        group.bench_with_input(BenchmarkId::new("sorted", size), &doc, |b, doc| {
            b.iter(|| black_box(doc).render_with(&RenderOptions::sorted()))
        });
    }
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let service = sample_service();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("ini_marshal", |b| {
        b.iter(|| to_string(black_box(&service)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&service)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let service = sample_service();

    c.bench_function("roundtrip_nested", |b| {
        b.iter(|| {
            let marshaled = to_string(black_box(&service)).unwrap();
            let _parsed = from_str(black_box(&marshaled)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_marshal_simple,
    benchmark_marshal_nested,
    benchmark_parse_simple,
    benchmark_parse_sections,
    benchmark_render_sections,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
