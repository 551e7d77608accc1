use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Feed-forward builder: a stack of fully-connected layers.
///
/// Applies one sigmoid-activated `Linear` per hidden width, in order, then a
/// final linear projection to the output width. With an empty hidden list the
/// network degenerates to a single linear layer.
///
/// Parameters are created exactly once, when the module is constructed.
/// Every `forward` call binds the same parameters, so sharing an `Mlp` value
/// between two heads shares its weights.
#[derive(Module, Debug)]
pub struct Mlp<B: Backend> {
    in_size: usize,
    out_size: usize,
    hidden: Vec<Linear<B>>,
    out: Linear<B>,
}

impl<B: Backend> Mlp<B> {
    /// Create a new feed-forward network.
    ///
    /// # Arguments
    /// * `in_size` - Width of the input features
    /// * `out_size` - Width of the output projection
    /// * `hidden_sizes` - Widths of the hidden layers, in order (may be empty)
    /// * `device` - Device to create the module on
    pub fn new(in_size: usize, out_size: usize, hidden_sizes: &[usize], device: &B::Device) -> Self {
        let mut hidden = Vec::with_capacity(hidden_sizes.len());
        let mut prev = in_size;
        for &size in hidden_sizes {
            hidden.push(LinearConfig::new(prev, size).with_bias(true).init(device));
            prev = size;
        }

        let out = LinearConfig::new(prev, out_size).with_bias(true).init(device);

        Self {
            in_size,
            out_size,
            hidden,
            out,
        }
    }

    /// Get the input width
    pub fn in_size(&self) -> usize {
        self.in_size
    }

    /// Get the output width
    pub fn out_size(&self) -> usize {
        self.out_size
    }

    /// Number of parameterized transformations (hidden layers plus the output
    /// projection).
    pub fn num_layers(&self) -> usize {
        self.hidden.len() + 1
    }

    /// Perform a forward pass.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, in_size]`
    ///
    /// # Returns
    /// Output tensor of shape `[batch_size, out_size]`
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = input;
        for layer in &self.hidden {
            x = activation::sigmoid(layer.forward(x));
        }
        self.out.forward(x)
    }
}
