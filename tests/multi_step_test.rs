#[cfg(test)]
mod tests {
    use burn::backend::{Autodiff, NdArray};
    use burn::tensor::Tensor;
    use rlnets::prelude::*;

    type Backend = NdArray<f32>;
    type AutodiffBackend = Autodiff<NdArray<f32>>;

    fn make_wrapper<B: burn::tensor::backend::Backend>(
        bptt_steps: usize,
    ) -> MultiStepConv<B, GruCell<B>> {
        let device = Default::default();
        let conv = ConvStack::<B>::trpo((1, 12, 12), 10, &device);
        let cell = GruCell::new(10, 10, &device);
        MultiStepConv::new(conv, cell, 4, bptt_steps, &device).unwrap()
    }

    fn random_input<B: burn::tensor::backend::Backend>() -> Tensor<B, 4> {
        let device = Default::default();
        Tensor::random(
            [1, 1, 12, 12],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        )
    }

    #[test]
    fn test_window_growth_then_saturation() {
        let mut model = make_wrapper::<Backend>(3);

        for call in 1..=6 {
            model.forward(random_input());
            assert_eq!(
                model.window_len(),
                call.min(3),
                "window length must be min(calls, capacity) at call {}",
                call
            );
        }
    }

    #[test]
    fn test_output_shape_stable_across_saturation() {
        let mut model = make_wrapper::<Backend>(2);

        for _ in 0..5 {
            let output = model.forward(random_input());
            assert_eq!(output.dims(), [1, 4]);
        }
    }

    #[test]
    fn test_carried_state_is_detached() {
        let mut model = make_wrapper::<AutodiffBackend>(3);

        for _ in 0..4 {
            model.forward(random_input());
        }

        let state = model.state().expect("state initialized by forward");
        assert!(
            !state.is_require_grad(),
            "the carried state must not be part of the gradient graph"
        );
    }

    #[test]
    fn test_gradients_reach_only_windowed_inputs() {
        let capacity = 3;
        let calls = 7;
        let mut model = make_wrapper::<AutodiffBackend>(capacity);

        let inputs: Vec<Tensor<AutodiffBackend, 4>> = (0..calls)
            .map(|_| random_input::<AutodiffBackend>().require_grad())
            .collect();

        let mut last_output = None;
        for input in &inputs {
            last_output = Some(model.forward(input.clone()));
        }

        let loss = last_output.unwrap().sum();
        let grads = loss.backward();

        // Inputs still inside the truncation window contribute gradients.
        for input in &inputs[calls - capacity..] {
            assert!(
                input.grad(&grads).is_some(),
                "windowed input lost its gradient path"
            );
        }

        // Older inputs were evicted and their state path detached, so no
        // gradient can reach them regardless of rollout length.
        for input in &inputs[..calls - capacity] {
            assert!(
                input.grad(&grads).is_none(),
                "gradient leaked past the truncation horizon"
            );
        }
    }

    #[test]
    fn test_backward_works_on_long_rollouts() {
        let mut model = make_wrapper::<AutodiffBackend>(2);

        let mut output = None;
        for _ in 0..10 {
            output = Some(model.forward(random_input()));
        }

        // The graph stays bounded, so a backward pass after many steps is
        // still a small computation rather than a 10-step unroll.
        let loss = output.unwrap().sum();
        let _grads = loss.backward();
    }
}
