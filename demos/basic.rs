//! Basic usage of the architecture builders.
//!
//! Builds each of the feed-forward and convolutional architectures and pushes
//! a random observation batch through them.

use burn::backend::NdArray;
use burn::tensor::Tensor;
use rlnets::prelude::*;

fn main() {
    type Backend = NdArray<f32>;
    let device = Default::default();

    println!("=== rlnets basic example ===\n");

    // Example 1: plain MLP over flat observations
    println!("Example 1: MLP");
    let mlp = Mlp::<Backend>::new(24, 4, &[64, 64], &device);
    let observations = Tensor::<Backend, 2>::random(
        [8, 24],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let output = mlp.forward(observations);

    println!("  Layers:       {}", mlp.num_layers());
    println!("  Input shape:  [8, 24]");
    println!("  Output shape: {:?}", output.dims());
    println!();

    // Example 2: the pixel-input preset
    println!("Example 2: DQN conv preset");
    let net = ConvStack::<Backend>::dqn((4, 84, 84), 6, &device);
    let frames = Tensor::<Backend, 4>::random(
        [2, 4, 84, 84],
        burn::tensor::Distribution::Uniform(0.0, 1.0),
        &device,
    );
    let action_values = net.forward(frames);

    println!("  Stages:       {}", net.num_stages());
    println!("  Feature size: {}", net.feature_size());
    println!("  Input shape:  [2, 4, 84, 84]");
    println!("  Output shape: {:?}", action_values.dims());
    println!();

    // Example 3: flat observations treated as a single image
    println!("Example 3: SimpleConvNet");
    let simple = SimpleConvNet::<Backend>::new(10, 3, &device).expect("valid feature width");
    let observations = Tensor::<Backend, 2>::random(
        [4, 10],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let output = simple.forward(observations);

    println!("  Image side:   {} (10 features zero-padded to 16)", simple.side());
    println!("  Input shape:  [4, 10]");
    println!("  Output shape: {:?}", output.dims());
    println!();

    println!("=== done ===");
}
