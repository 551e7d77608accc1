use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::RecurrentCell;

/// Standard GRU cell
///
/// Implements the standard GRU equations:
/// - r = sigmoid(W_ir @ x + b_ir + W_hr @ h)
/// - z = sigmoid(W_iz @ x + b_iz + W_hz @ h)
/// - n = tanh(W_in @ x + b_in + r * (W_hn @ h))
/// - h' = (1 - z) * n + z * h
///
/// The output equals the new state.
#[derive(Module, Debug)]
pub struct GruCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    input_map: Linear<B>,     // Maps input to 3 * hidden_size (with bias)
    recurrent_map: Linear<B>, // Maps hidden state to 3 * hidden_size (no bias)
}

impl<B: Backend> GruCell<B> {
    /// Create a new GRU cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, 3 * hidden_size)
            .with_bias(true)
            .init(device);

        let recurrent_map = LinearConfig::new(hidden_size, 3 * hidden_size)
            .with_bias(false)
            .init(device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Perform a forward pass through the GRU cell
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `state` - Hidden state of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (output, new_state); for a GRU the two are the same value
    pub fn forward(
        &self,
        input: Tensor<B, 2>,
        state: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let [batch_size, _] = state.dims();
        let device = state.device();

        let input_contrib = self.input_map.forward(input);
        let recurrent_contrib = self.recurrent_map.forward(state.clone());

        // Split into 3 gates each
        let xs = input_contrib.chunk(3, 1);
        let hs = recurrent_contrib.chunk(3, 1);

        let reset_gate = activation::sigmoid(xs[0].clone() + hs[0].clone());
        let update_gate = activation::sigmoid(xs[1].clone() + hs[1].clone());
        let candidate = (xs[2].clone() + reset_gate * hs[2].clone()).tanh();

        // h' = (1 - z) * n + z * h
        let ones = Tensor::<B, 2>::ones([batch_size, self.hidden_size], &device);
        let new_state = (ones - update_gate.clone()) * candidate + update_gate * state;

        (new_state.clone(), new_state)
    }
}

impl<B: Backend> RecurrentCell<B> for GruCell<B> {
    fn input_size(&self) -> usize {
        self.input_size
    }

    fn state_size(&self) -> usize {
        self.hidden_size
    }

    fn forward(&self, input: Tensor<B, 2>, state: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 2>) {
        GruCell::forward(self, input, state)
    }
}
