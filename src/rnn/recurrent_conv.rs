use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use log::debug;

use crate::cells::{GruCell, RecurrentCell};
use crate::conv::ConvStack;
use crate::error::{ModelError, Result};
use crate::mlp::Mlp;

/// Single-step recurrent-convolutional wrapper.
///
/// Each forward call runs the convolutional stack on the input, applies the
/// recurrent cell once against the owned state, stores the new state, and
/// projects the cell output to the task width.
///
/// The wrapper is a two-state machine: uninitialized until the first forward
/// call (or an explicit [`reset`](Self::reset)) installs a zero state sized
/// to the batch, initialized afterwards. State persists for the wrapper's
/// lifetime; gradients are **not** detached between calls, so the
/// computation graph grows with every call. Use
/// [`MultiStepConv`](crate::rnn::MultiStepConv) for long rollouts.
pub struct RecurrentConv<B: Backend, C: RecurrentCell<B> = GruCell<B>> {
    conv: ConvStack<B>,
    cell: C,
    head: Mlp<B>,
    state: Option<Tensor<B, 2>>,
    device: B::Device,
}

impl<B: Backend, C: RecurrentCell<B>> RecurrentConv<B, C> {
    /// Wire a convolutional stack, a recurrent cell, and an output head.
    ///
    /// # Arguments
    /// * `conv` - Convolutional stack; its output width must match the
    ///   cell's input width
    /// * `cell` - Recurrent cell
    /// * `out_size` - Width of the task output
    /// * `device` - Device to create the head and recurrent state on
    ///
    /// # Errors
    /// [`ModelError::SizeMismatch`] when the stack's output width differs
    /// from the cell's input width.
    pub fn new(conv: ConvStack<B>, cell: C, out_size: usize, device: &B::Device) -> Result<Self> {
        if conv.out_size() != cell.input_size() {
            return Err(ModelError::SizeMismatch {
                context: "convolutional features into recurrent cell",
                produced: conv.out_size(),
                expected: cell.input_size(),
            });
        }

        let head = Mlp::new(cell.output_size(), out_size, &[], device);

        Ok(Self {
            conv,
            cell,
            head,
            state: None,
            device: device.clone(),
        })
    }

    /// The convolutional stack (e.g. for parameter collection).
    pub fn conv(&self) -> &ConvStack<B> {
        &self.conv
    }

    /// The recurrent cell.
    pub fn cell(&self) -> &C {
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
            [batch_size, self.cell.state_size()],
            &self.device,
        ));
    }

    /// Perform a forward pass, advancing the recurrent state by one step.
    ///
    /// # Arguments
    /// * `input` - Image tensor of shape `[batch, channels, height, width]`
    ///
    /// # Returns
    /// Output tensor of shape `[batch, out_size]`
    pub fn forward(&mut self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        let features = self.conv.forward(input);
        let [batch_size, _] = features.dims();

        let state = match self.state.take() {
            Some(state) => state,
            None => {
                debug!("initializing recurrent state for batch size {batch_size}");
                Tensor::zeros([batch_size, self.cell.state_size()], &self.device)
            }
        };

        let (output, new_state) = self.cell.forward(features, state);
        self.state = Some(new_state);

        self.head.forward(output)
    }
}
