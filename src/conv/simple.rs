//! Single-image convolutional variant for flat observation vectors.

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::PaddingConfig2d;
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::stack::{conv_out_dim, same_padding};
use crate::error::{ModelError, Result};
use crate::mlp::Mlp;

/// Single-layer convolutional network over a flat feature vector.
///
/// For observation vectors with no natural spatial structure: the vector is
/// zero-padded to `side²` where `side = ceil(sqrt(in_features))`, reshaped
/// into a `side`×`side` single-channel image, pushed through one SAME-padded
/// convolution of filter size `side` (no bias), flattened, relu-activated,
/// and projected to `out_size` by a hidden-layer-free [`Mlp`].
///
/// Zero-padding makes the reshape total: `side² >= in_features` always holds,
/// so no observation value is ever truncated.
#[derive(Module, Debug)]
pub struct SimpleConvNet<B: Backend> {
    conv: Conv2d<B>,
    head: Mlp<B>,
    in_features: usize,
    side: usize,
    out_size: usize,
}

impl<B: Backend> SimpleConvNet<B> {
    /// Create a new single-image network.
    ///
    /// # Arguments
    /// * `in_features` - Width of the flat observation vector
    /// * `out_size` - Width of the output projection
    /// * `device` - Device to create the module on
    ///
    /// # Errors
    /// [`ModelError::EmptyInput`] when `in_features` is zero.
    pub fn new(in_features: usize, out_size: usize, device: &B::Device) -> Result<Self> {
        if in_features == 0 {
            return Err(ModelError::EmptyInput);
        }

        let side = (in_features as f64).sqrt().ceil() as usize;
        let pad = same_padding(side, side, 1);
        let conv_dim = conv_out_dim(side, side, 1, pad);

        let conv = Conv2dConfig::new([1, 1], [side, side])
            .with_stride([1, 1])
            .with_padding(PaddingConfig2d::Explicit(pad, pad))
            .with_bias(false)
            .init(device);

        let head = Mlp::new(conv_dim * conv_dim, out_size, &[], device);

        Ok(Self {
            conv,
            head,
            in_features,
            side,
            out_size,
        })
    }

    /// Width of the flat observation vector.
    pub fn in_features(&self) -> usize {
        self.in_features
    }

    /// Side length of the square image the vector is reshaped into.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Width of the output projection.
    pub fn out_size(&self) -> usize {
        self.out_size
    }

    /// Perform a forward pass.
    ///
    /// # Arguments
    /// * `input` - Observation tensor of shape `[batch, in_features]`
    ///
    /// # Returns
    /// Output tensor of shape `[batch, out_size]`
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, features] = input.dims();
        assert_eq!(
            features, self.in_features,
            "observation width {} does not match the {} this network was built for",
            features, self.in_features
        );

        let square = self.side * self.side;
        let x = if features < square {
            let device = input.device();
            let padding = Tensor::zeros([batch, square - features], &device);
            Tensor::cat(vec![input, padding], 1)
        } else {
            input
        };

        let image = x.reshape([batch, 1, self.side, self.side]);
        let conv_out = self.conv.forward(image);

        let flat: Tensor<B, 2> = conv_out.flatten(1, 3);
        self.head.forward(activation::relu(flat))
    }
}
