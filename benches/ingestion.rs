use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use circus_shows::ingestion::{ingest_upload, IngestionOptions};

fn tour_csv(rows: usize) -> Vec<u8> {
    let mut out = String::from("CIRCUS NAME,VENUE NAME,ADDRESS,CITY,STATE,ZIP,COORDS,Show Date\n");
    for i in 0..rows {
        // Every tenth row has an unparseable date so the rejection path is exercised too.
        let date = if i % 10 == 9 {
            "N/A".to_string()
        } else {
            format!("2025-{:02}-{:02}", 4 + (i / 28) % 6, 1 + i % 28)
        };
        out.push_str(&format!(
            "Big Top,Venue {v},{i} Main St,City {v},NY,{zip:05},\"40.{i:04}, -73.{i:04}\",{date}\n",
            v = i % 50,
            zip = 10000 + i % 900,
        ));
    }
    out.into_bytes()
}

fn bench_csv_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_upload_csv");
    let opts = IngestionOptions {
        max_file_bytes: None,
        ..Default::default()
    };
    for rows in [100usize, 1_000, 10_000] {
        let bytes = tour_csv(rows);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &bytes, |b, bytes| {
            b.iter(|| ingest_upload(black_box(bytes), "bench.csv", &opts))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_csv_ingestion);
criterion_main!(benches);
