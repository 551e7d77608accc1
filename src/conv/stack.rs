//! Convolutional stack builder and its named presets.

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::MaxPool2dConfig;
use burn::nn::PaddingConfig2d;
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::error::{ModelError, Result};
use crate::mlp::Mlp;

/// Symmetric SAME padding for one spatial dimension: enough to keep
/// `ceil(size / stride)` output positions, rounded up when the total is odd.
pub(crate) fn same_padding(size: usize, kernel: usize, stride: usize) -> usize {
    let total = ((size.div_ceil(stride) - 1) * stride + kernel).saturating_sub(size);
    total.div_ceil(2)
}

/// Output size of one spatial dimension under the standard conv arithmetic.
pub(crate) fn conv_out_dim(size: usize, kernel: usize, stride: usize, padding: usize) -> usize {
    (size + 2 * padding - kernel) / stride + 1
}

/// Named hyperparameter presets for [`ConvStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ConvPreset {
    /// Deep, narrowing-stride variant: 3 stages, strides 4/2/1,
    /// channels 32/64/64, filter sizes 8/4/3, dense width 512.
    Dqn,
    /// Shallow, wide-stride variant: 2 stages, strides 2/2,
    /// channels 16/16, filter sizes 4/4, dense width 20.
    Trpo,
}

impl ConvPreset {
    /// The preset's hyperparameters as `(strides, channels, filter_sizes, dense_size)`.
    pub fn hyperparameters(self) -> (&'static [usize], &'static [usize], &'static [usize], usize) {
        match self {
            ConvPreset::Dqn => (&[4, 2, 1], &[32, 64, 64], &[8, 4, 3], 512),
            ConvPreset::Trpo => (&[2, 2], &[16, 16], &[4, 4], 20),
        }
    }
}

/// Convolutional stack: L convolution stages followed by a dense head.
///
/// Stage i applies a SAME-padded square convolution (filter size, output
/// channel count, and stride taken from position i of the hyperparameter
/// lists) with a per-output-channel bias, then relu. After the last stage the
/// activations are flattened per batch element and projected through an
/// [`Mlp`] with a single hidden layer of `dense_size`.
///
/// Because layer widths are fixed at construction, the builder needs the full
/// input image shape up front; `forward` then accepts any batch size.
#[derive(Module, Debug)]
pub struct ConvStack<B: Backend> {
    convs: Vec<Conv2d<B>>,
    head: Mlp<B>,
    in_channels: usize,
    in_height: usize,
    in_width: usize,
    out_size: usize,
    feature_size: usize,
    strides: Vec<usize>,
    channels: Vec<usize>,
    filter_sizes: Vec<usize>,
    dense_size: usize,
}

impl<B: Backend> ConvStack<B> {
    /// Create a new convolutional stack.
    ///
    /// # Arguments
    /// * `in_shape` - Input image shape as `(channels, height, width)`
    /// * `out_size` - Width of the final output projection
    /// * `strides` - Per-stage convolution stride
    /// * `channels` - Per-stage output channel count
    /// * `filter_sizes` - Per-stage square filter size
    /// * `dense_size` - Width of the dense head's hidden layer
    /// * `device` - Device to create the module on
    ///
    /// # Errors
    /// [`ModelError::HyperparameterLengthMismatch`] when the three per-stage
    /// lists disagree on the number of stages, [`ModelError::EmptyStack`]
    /// when they are empty.
    pub fn new(
        in_shape: (usize, usize, usize),
        out_size: usize,
        strides: &[usize],
        channels: &[usize],
        filter_sizes: &[usize],
        dense_size: usize,
        device: &B::Device,
    ) -> Result<Self> {
        if strides.len() != channels.len() || strides.len() != filter_sizes.len() {
            return Err(ModelError::HyperparameterLengthMismatch {
                strides: strides.len(),
                channels: channels.len(),
                filter_sizes: filter_sizes.len(),
            });
        }
        if strides.is_empty() {
            return Err(ModelError::EmptyStack);
        }

        Ok(Self::build(
            in_shape,
            out_size,
            strides,
            channels,
            filter_sizes,
            dense_size,
            device,
        ))
    }

    /// Create a stack from a named preset.
    pub fn from_preset(
        preset: ConvPreset,
        in_shape: (usize, usize, usize),
        out_size: usize,
        device: &B::Device,
    ) -> Self {
        let (strides, channels, filter_sizes, dense_size) = preset.hyperparameters();
        Self::build(
            in_shape,
            out_size,
            strides,
            channels,
            filter_sizes,
            dense_size,
            device,
        )
    }

    /// Shorthand for [`ConvPreset::Dqn`].
    pub fn dqn(in_shape: (usize, usize, usize), out_size: usize, device: &B::Device) -> Self {
        Self::from_preset(ConvPreset::Dqn, in_shape, out_size, device)
    }

    /// Shorthand for [`ConvPreset::Trpo`].
    pub fn trpo(in_shape: (usize, usize, usize), out_size: usize, device: &B::Device) -> Self {
        Self::from_preset(ConvPreset::Trpo, in_shape, out_size, device)
    }

    fn build(
        in_shape: (usize, usize, usize),
        out_size: usize,
        strides: &[usize],
        channels: &[usize],
        filter_sizes: &[usize],
        dense_size: usize,
        device: &B::Device,
    ) -> Self {
        let (in_channels, in_height, in_width) = in_shape;

        let mut convs = Vec::with_capacity(strides.len());
        let mut prev_channels = in_channels;
        let (mut height, mut width) = (in_height, in_width);

        for ((&stride, &num_filters), &filter_size) in
            strides.iter().zip(channels).zip(filter_sizes)
        {
            let pad_h = same_padding(height, filter_size, stride);
            let pad_w = same_padding(width, filter_size, stride);

            convs.push(
                Conv2dConfig::new([prev_channels, num_filters], [filter_size, filter_size])
                    .with_stride([stride, stride])
                    .with_padding(PaddingConfig2d::Explicit(pad_h, pad_w))
                    .with_bias(true)
                    .init(device),
            );
            prev_channels = num_filters;
            height = conv_out_dim(height, filter_size, stride, pad_h);
            width = conv_out_dim(width, filter_size, stride, pad_w);
        }

        let feature_size = prev_channels * height * width;
        let head = Mlp::new(feature_size, out_size, &[dense_size], device);

        Self {
            convs,
            head,
            in_channels,
            in_height,
            in_width,
            out_size,
            feature_size,
            strides: strides.to_vec(),
            channels: channels.to_vec(),
            filter_sizes: filter_sizes.to_vec(),
            dense_size,
        }
    }

    /// Number of convolution stages.
    pub fn num_stages(&self) -> usize {
        self.convs.len()
    }

    /// Input image shape as `(channels, height, width)`.
    pub fn in_shape(&self) -> (usize, usize, usize) {
        (self.in_channels, self.in_height, self.in_width)
    }

    /// Width of the final output projection.
    pub fn out_size(&self) -> usize {
        self.out_size
    }

    /// Flattened activation width fed into the dense head.
    pub fn feature_size(&self) -> usize {
        self.feature_size
    }

    /// Per-stage strides.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Per-stage output channel counts.
    pub fn channels(&self) -> &[usize] {
        &self.channels
    }

    /// Per-stage filter sizes.
    pub fn filter_sizes(&self) -> &[usize] {
        &self.filter_sizes
    }

    /// Width of the dense head's hidden layer.
    pub fn dense_size(&self) -> usize {
        self.dense_size
    }

    /// Perform a forward pass.
    ///
    /// # Arguments
    /// * `input` - Image tensor of shape `[batch, channels, height, width]`
    ///   matching the shape given at construction
    ///
    /// # Returns
    /// Output tensor of shape `[batch, out_size]`
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        let mut x = input;
        for conv in &self.convs {
            x = activation::relu(conv.forward(x));
        }

        let flat: Tensor<B, 2> = x.flatten(1, 3);
        self.head.forward(flat)
    }
}

/// Max-pool an image tensor with a `k`×`k` window, stride `k`, SAME padding.
pub fn max_pool2d<B: Backend>(x: Tensor<B, 4>, k: usize) -> Tensor<B, 4> {
    let [_, _, height, width] = x.dims();
    let pad_h = same_padding(height, k, k);
    let pad_w = same_padding(width, k, k);

    MaxPool2dConfig::new([k, k])
        .with_strides([k, k])
        .with_padding(PaddingConfig2d::Explicit(pad_h, pad_w))
        .init()
        .forward(x)
}
