use criterion::{Criterion, black_box, criterion_group, criterion_main};

use backprop_net::{Activation, Network, Topology};

fn mid_sized_net() -> Network {
    Topology::uniform(128, 10, 2, 256, 0.05, Activation::Sigmoid)
        .unwrap()
        .build_with_seed(0)
        .unwrap()
}

fn forward_bench(c: &mut Criterion) {
    let mut net = mid_sized_net();
    let input = vec![0.1_f64; net.input_len()];

    c.bench_function("forward_128_256_256_10", |b| {
        b.iter(|| {
            let out = net.forward_propagate(black_box(&input));
            black_box(out);
        })
    });
}

fn backward_bench(c: &mut Criterion) {
    let mut net = mid_sized_net();
    let input = vec![0.1_f64; net.input_len()];
    let target = vec![0.0_f64; net.output_len()];

    net.forward_propagate(&input);

    c.bench_function("backward_128_256_256_10", |b| {
        b.iter(|| {
            let mse = net.back_propagate(black_box(&input), black_box(&target));
            black_box(mse);
        })
    });
}

criterion_group!(benches, forward_bench, backward_bench);
criterion_main!(benches);
