// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dashvault::store::{FsContentAccess, MemoryContentAccess};
use dashvault::structure::{DashboardStructure, OperationParams, StructureContext};
use serde_json::{json, Value};

// Deterministic structure with `charts` chart components and as many data sources.
fn structure(charts: usize) -> String {
    let property = |name: &str, value: String| json!({ "name": name, "value": value });

    let components: Vec<Value> = (0..charts)
        .map(|i| {
            json!({
                "id": format!("render_chart{i}"),
                "type": "ComponentsbarChart",
                "properties": [
                    property("name", format!("chart{i}")),
                    property("dataSource", format!("query{i}")),
                    property("htmlObject", format!("cell{i}")),
                ],
            })
        })
        .collect();

    let datasources: Vec<Value> = (0..charts)
        .map(|i| {
            json!({
                "id": format!("query{i}"),
                "type": "Componentssql_sqlJndi",
                "properties": [
                    property("name", format!("query{i}")),
                    property("jndi", "SampleData".to_owned()),
                    property("query", format!("select * from facts where bucket = {i}")),
                ],
            })
        })
        .collect();

    json!({
        "layout": { "title": "Bench", "rows": [] },
        "components": { "rows": components },
        "datasources": { "rows": datasources },
        "filename": "",
    })
    .to_string()
}

fn memory_dashboards() -> DashboardStructure {
    let ctx = StructureContext::new(
        Arc::new(MemoryContentAccess::new()),
        Arc::new(MemoryContentAccess::new()),
    );
    DashboardStructure::new(ctx)
}

// Benchmark identity (keep stable):
// - Group name in this file: `structure.save`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.
fn benches_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure.save");

    for (case, charts) in [("small", 2usize), ("medium", 40)] {
        let params = OperationParams::new("/public/bench.cdfde").with_structure(structure(charts));

        let dashboards = memory_dashboards();
        let memory_params = params.clone();
        group.bench_function(format!("memory_{case}"), move |b| {
            b.iter(|| {
                dashboards
                    .save(black_box(&memory_params))
                    .expect("save")
                    .artifacts
                    .len()
            })
        });

        group.bench_function(format!("io_{case}"), move |b| {
            b.iter_batched_ref(
                || {
                    let tmp = tempfile::tempdir().expect("tempdir");
                    let ctx = StructureContext::new(
                        Arc::new(FsContentAccess::new(tmp.path().join("content"))),
                        Arc::new(FsContentAccess::new(tmp.path().join("system"))),
                    );
                    (tmp, DashboardStructure::new(ctx))
                },
                |(_tmp, dashboards)| {
                    black_box(dashboards.save(black_box(&params)).expect("save").cache_invalidated)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, benches_save);
criterion_main!(benches);
