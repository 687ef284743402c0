use backprop_net::{Activation, LayerSpec, Topology};

fn main() -> backprop_net::Result<()> {
    // Classic XOR dataset.
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    // 2 -> 8 -> 1 network: tanh hidden layer, sigmoid output for a
    // probability-like output.
    let mut net = Topology::new(2, LayerSpec::new(1, 0.1, Activation::Sigmoid)?)?
        .add_hidden_layer(LayerSpec::new(8, 0.1, Activation::Tanh)?)
        .build_with_seed(0)?;

    let num_epochs = 5_000;
    for epoch in 0..num_epochs {
        let mse = net.train(&inputs, &targets);
        if epoch % 500 == 0 {
            println!("epoch {epoch:>5}  mse={mse:.6}");
        }
    }

    println!("final mse: {:.6}", net.evaluate_mse(&inputs, &targets)?);
    for input in &inputs {
        let output = net.predict(input);
        println!("{:?} -> {:.4}", input, output[0]);
    }

    Ok(())
}
