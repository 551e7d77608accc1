use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use log::debug;

use crate::cells::GruCell;
use crate::mlp::Mlp;

/// Stateful GRU over raw feature vectors.
///
/// The same two-state machine as
/// [`RecurrentConv`](crate::rnn::RecurrentConv), without a convolution
/// stage: the cell is applied directly to the `[batch, features]` input and
/// the cell output is projected to the task width.
pub struct StatefulGru<B: Backend> {
    cell: GruCell<B>,
    head: Mlp<B>,
    state: Option<Tensor<B, 2>>,
    device: B::Device,
}

impl<B: Backend> StatefulGru<B> {
    /// Create a new stateful GRU.
    ///
    /// # Arguments
    /// * `in_size` - Width of the input features
    /// * `hidden_size` - Width of the recurrent state
    /// * `out_size` - Width of the task output
    /// * `device` - Device to create the modules and state on
    pub fn new(in_size: usize, hidden_size: usize, out_size: usize, device: &B::Device) -> Self {
        let cell = GruCell::new(in_size, hidden_size, device);
        let head = Mlp::new(hidden_size, out_size, &[], device);

        Self {
            cell,
            head,
            state: None,
            device: device.clone(),
        }
    }

    /// The recurrent cell.
    pub fn cell(&self) -> &GruCell<B> {
        &self.cell
    }

    /// The output head.
    pub fn head(&self) -> &Mlp<B> {
        &self.head
    }

    /// The current recurrent state, if initialized.
    pub fn state(&self) -> Option<&Tensor<B, 2>> {
        self.state.as_ref()
    }

    /// Install a fresh zero state for the given batch size.
    pub fn reset(&mut self, batch_size: usize) {
        self.state = Some(Tensor::zeros(
            [batch_size, self.cell.hidden_size()],
            &self.device,
        ));
    }

    /// Perform a forward pass, advancing the recurrent state by one step.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, in_size]`
    ///
    /// # Returns
    /// Output tensor of shape `[batch, out_size]`
    pub fn forward(&mut self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch_size, _] = input.dims();

        let state = match self.state.take() {
            Some(state) => state,
            None => {
                debug!("initializing recurrent state for batch size {batch_size}");
                Tensor::zeros([batch_size, self.cell.hidden_size()], &self.device)
            }
        };

        let (output, new_state) = self.cell.forward(input, state);
        self.state = Some(new_state);

        self.head.forward(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_stateful_gru_starts_uninitialized() {
        let device = Default::default();
        let gru = StatefulGru::<TestBackend>::new(8, 16, 4, &device);

        assert!(gru.state().is_none());
    }

    #[test]
    fn test_stateful_gru_forward() {
        let device = Default::default();
        let mut gru = StatefulGru::<TestBackend>::new(8, 16, 4, &device);

        let input = Tensor::<TestBackend, 2>::zeros([3, 8], &device);
        let output = gru.forward(input);

        assert_eq!(output.dims(), [3, 4]);
        assert_eq!(gru.state().unwrap().dims(), [3, 16]);
    }

    #[test]
    fn test_stateful_gru_state_evolves() {
        let device = Default::default();
        let mut gru = StatefulGru::<TestBackend>::new(8, 16, 4, &device);

        let input = Tensor::<TestBackend, 2>::random(
            [1, 8],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        );

        gru.forward(input.clone());
        let first = gru.state().unwrap().clone();

        gru.forward(input);
        let second = gru.state().unwrap().clone();

        let diff = (first - second).abs().sum().into_scalar();
        assert!(diff > 0.0, "state should advance on every call");
    }

    #[test]
    fn test_stateful_gru_reset() {
        let device = Default::default();
        let mut gru = StatefulGru::<TestBackend>::new(8, 16, 4, &device);

        let input = Tensor::<TestBackend, 2>::random(
            [2, 8],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        );
        gru.forward(input);

        gru.reset(2);

        let state = gru.state().unwrap();
        assert_eq!(state.clone().abs().sum().into_scalar(), 0.0);
    }
}
