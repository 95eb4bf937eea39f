use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use layerkit_core::PlateSize;
use layerkit_reader::{GcodeReader, ReadContext};

/// Generate a square-perimeter print with the given number of layers
fn generate_gcode(layers: usize, explicit: bool) -> String {
    let mut text = String::from("G28\nG92 E0\n");
    let mut e = 0.0;
    for layer in 0..layers {
        if explicit {
            text.push_str(&format!(";LAYER:{layer}\n"));
        }
        let z = 0.2 * (layer + 1) as f64;
        text.push_str(&format!("G0 X0 Y0 Z{z:.2}\n;TYPE:WALL-OUTER\n"));
        for (x, y) in [(50.0, 0.0), (50.0, 50.0), (0.0, 50.0), (0.0, 0.0)] {
            e += 1.5;
            text.push_str(&format!("G1 X{x} Y{y} E{e:.3}\n"));
        }
        text.push_str(";TYPE:FILL\n");
        for i in 0..20 {
            e += 0.8;
            let y = 2.5 * i as f64;
            text.push_str(&format!("G0 X0 Y{y}\nG1 X50 Y{y} E{e:.3}\n"));
        }
    }
    text
}

fn bench_read_str(c: &mut Criterion) {
    let plate = PlateSize::new(200.0, 200.0);
    let reader = GcodeReader::new();
    let mut group = c.benchmark_group("read_str");

    for layers in [10, 100, 500] {
        for explicit in [true, false] {
            let text = generate_gcode(layers, explicit);
            let id = if explicit { "explicit" } else { "inferred" };
            group.bench_with_input(BenchmarkId::new(id, layers), &text, |b, text| {
                b.iter(|| reader.read_str(black_box(text), ReadContext::new(&plate)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_read_str);
criterion_main!(benches);
