//! Recurrent rollout with truncated backpropagation through time.
//!
//! Drives a MultiStepConv wrapper through a short rollout, showing how the
//! feature window saturates at the truncation depth while the output shape
//! stays fixed. Run with RUST_LOG=debug to see the state-machine
//! transitions.

use burn::backend::NdArray;
use burn::tensor::Tensor;
use rlnets::prelude::*;

fn main() {
    env_logger::init();

    type Backend = NdArray<f32>;
    let device = Default::default();

    println!("=== rlnets recurrent rollout ===\n");

    let bptt_steps = 3;
    let n_actions = 5;

    let conv = ConvStack::<Backend>::trpo((1, 20, 20), 10, &device);
    let cell = GruCell::new(10, 10, &device);
    let mut model = MultiStepConv::new(conv, cell, n_actions, bptt_steps, &device)
        .expect("widths line up");

    println!("Model:");
    println!("  Conv stages:  {}", model.conv().num_stages());
    println!("  State width:  {}", model.cell().hidden_size());
    println!("  BPTT steps:   {}", model.bptt_steps());
    println!();

    for step in 1..=6 {
        let observation = Tensor::<Backend, 4>::random(
            [1, 1, 20, 20],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        );

        let action_values = model.forward(observation);

        println!(
            "  step {}: window {}/{}  output {:?}",
            step,
            model.window_len(),
            model.bptt_steps(),
            action_values.dims()
        );
    }

    println!();
    println!("Resetting for a new episode with batch size 4");
    model.reset(4);
    println!("  window {}/{}", model.window_len(), model.bptt_steps());

    let observation = Tensor::<Backend, 4>::random(
        [4, 1, 20, 20],
        burn::tensor::Distribution::Uniform(0.0, 1.0),
        &device,
    );
    let action_values = model.forward(observation);
    println!("  output {:?}", action_values.dims());

    println!();
    println!("=== done ===");
}
