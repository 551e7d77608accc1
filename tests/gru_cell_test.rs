#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use burn::tensor::Tensor;
    use rlnets::cells::{GruCell, RecurrentCell};

    type Backend = NdArray<f32>;

    #[test]
    fn test_gru_cell_widths() {
        let device = Default::default();
        let cell = GruCell::<Backend>::new(12, 24, &device);

        assert_eq!(cell.input_size(), 12);
        assert_eq!(cell.hidden_size(), 24);
        assert_eq!(RecurrentCell::<Backend>::output_size(&cell), 24);
    }

    #[test]
    fn test_gru_single_step() {
        let device = Default::default();
        let cell = GruCell::<Backend>::new(12, 24, &device);

        let input = Tensor::<Backend, 2>::random(
            [4, 12],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let state = Tensor::<Backend, 2>::zeros([4, 24], &device);

        let (output, new_state) = cell.forward(input, state);

        assert_eq!(output.dims(), [4, 24]);
        assert_eq!(new_state.dims(), [4, 24]);
    }

    #[test]
    fn test_gru_state_stays_bounded() {
        let device = Default::default();
        let cell = GruCell::<Backend>::new(4, 8, &device);

        // The state is a convex combination of the previous state and a
        // tanh candidate, so it can never leave (-1, 1) when started at zero.
        let mut state = Tensor::<Backend, 2>::zeros([1, 8], &device);
        for _ in 0..20 {
            let input = Tensor::<Backend, 2>::random(
                [1, 4],
                burn::tensor::Distribution::Uniform(-1.0, 1.0),
                &device,
            );
            (_, state) = cell.forward(input, state);
        }

        let max_abs = state.abs().max().into_scalar();
        assert!(max_abs < 1.0, "GRU state escaped its bounds: {}", max_abs);
    }

    #[test]
    fn test_gru_through_trait_object_seam() {
        let device = Default::default();
        let cell: Box<dyn RecurrentCell<Backend>> =
            Box::new(GruCell::<Backend>::new(6, 10, &device));

        let input = Tensor::<Backend, 2>::zeros([2, 6], &device);
        let state = Tensor::<Backend, 2>::zeros([2, 10], &device);

        let (output, new_state) = cell.forward(input, state);

        assert_eq!(output.dims(), [2, 10]);
        assert_eq!(new_state.dims(), [2, 10]);
    }
}
