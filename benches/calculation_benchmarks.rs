//! Performance benchmarks for the salary engine.
//!
//! This benchmark suite measures:
//! - A single calculation through the pure pipeline
//! - A single calculation through the HTTP router
//! - Batches of 100 and 1000 payroll lines
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use sueldo_engine::api::{AppState, create_router};
use sueldo_engine::calculation::calcular_sueldo;
use sueldo_engine::config::ConfigLoader;
use sueldo_engine::models::SueldoInput;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Loads the parameter periods shipped with the crate.
fn create_test_config() -> ConfigLoader {
    ConfigLoader::load("./config/cl").expect("Failed to load config")
}

/// Creates a request body with every earning and deduction populated.
fn create_request(i: usize) -> serde_json::Value {
    let contratos = ["indefinido", "plazo_fijo", "obra_faena"];
    let afps = ["capital", "cuprum", "habitat", "modelo", "planvital", "provida", "uno"];

    serde_json::json!({
        "sueldoBase": (600_000 + (i % 50) * 120_000).to_string(),
        "fecha": "2025-08-31",
        "afp": afps[i % afps.len()],
        "tipoSalud": "fonasa",
        "tipoContrato": contratos[i % contratos.len()],
        "horasExtras": { "cincuenta": (i % 12).to_string(), "cien": (i % 3).to_string() },
        "bonos": { "nocturnidad": "25000", "responsabilidad": "40000" },
        "comisiones": ((i % 7) * 35_000).to_string(),
        "noImponible": { "colacion": "60000", "movilizacion": "40000" },
        "anticipos": "100000",
        "apv": ((i % 4) * 25_000).to_string()
    })
}

fn create_input(i: usize) -> SueldoInput {
    serde_json::from_value(create_request(i)).expect("Failed to create input")
}

/// Benchmark: a single calculation without the HTTP layer.
fn bench_single_calculation(c: &mut Criterion) {
    let config = create_test_config();
    let input = create_input(7);

    c.bench_function("single_calculation", |b| {
        b.iter(|| black_box(calcular_sueldo(black_box(&input), &config)))
    });
}

/// Benchmark: a single calculation through `POST /calcular`.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(create_test_config()));
    let body = create_request(7).to_string();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calcular")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: payroll batches of increasing size.
fn bench_batches(c: &mut Criterion) {
    let config = create_test_config();

    let mut group = c.benchmark_group("batch_processing");

    for size in [100usize, 1000].iter() {
        let inputs: Vec<SueldoInput> = (0..*size).map(create_input).collect();

        group.throughput(Throughput::Elements(*size as u64));
        if *size >= 1000 {
            group.sample_size(10);
        }
        group.bench_with_input(BenchmarkId::new("inputs", size), &inputs, |b, inputs| {
            b.iter(|| {
                let results: Vec<_> = inputs
                    .iter()
                    .map(|input| calcular_sueldo(input, &config))
                    .collect();
                black_box(results)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_single_request,
    bench_batches,
);
criterion_main!(benches);
