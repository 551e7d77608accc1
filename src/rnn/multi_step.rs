use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use log::{debug, trace};

use crate::cells::{GruCell, RecurrentCell};
use crate::conv::ConvStack;
use crate::error::{ModelError, Result};
use crate::mlp::Mlp;
use crate::rnn::window::BpttWindow;

/// Multi-step recurrent-convolutional wrapper with truncated
/// backpropagation through time.
///
/// Keeps a bounded FIFO window of the most recent convolutional features
/// (capacity = `bptt_steps`) next to a persistent cell state. Each forward
/// call:
///
/// 1. pushes the current input's convolutional features into the window,
///    evicting the oldest entry once the window is full;
/// 2. applies the cell to the **oldest** window entry and the persistent
///    state, then stores that new state **detached** as the state carried
///    into the next call;
/// 3. re-applies the cell over the remaining entries, oldest to newest,
///    chaining the undetached state so gradients flow freely across them;
/// 4. projects the final cell output to the task width.
///
/// The detach in step 2 bounds the backpropagation depth through the carried
/// state to `bptt_steps`, no matter how long the wrapper has been running,
/// while the window still feeds a longer history into the forward value.
pub struct MultiStepConv<B: Backend, C: RecurrentCell<B> = GruCell<B>> {
    conv: ConvStack<B>,
    cell: C,
    head: Mlp<B>,
    window: BpttWindow<Tensor<B, 2>>,
    state: Option<Tensor<B, 2>>,
    device: B::Device,
}

impl<B: Backend, C: RecurrentCell<B>> MultiStepConv<B, C> {
    /// Wire a convolutional stack, a recurrent cell, and an output head.
    ///
    /// # Arguments
    /// * `conv` - Convolutional stack; its output width must match the
    ///   cell's input width
    /// * `cell` - Recurrent cell
    /// * `out_size` - Width of the task output
    /// * `bptt_steps` - Truncation depth; capacity of the feature window
    /// * `device` - Device to create the head and recurrent state on
    ///
    /// # Errors
    /// [`ModelError::ZeroCapacity`] when `bptt_steps` is zero,
    /// [`ModelError::SizeMismatch`] when the stack's output width differs
    /// from the cell's input width.
    pub fn new(
        conv: ConvStack<B>,
        cell: C,
        out_size: usize,
        bptt_steps: usize,
        device: &B::Device,
    ) -> Result<Self> {
        let window = BpttWindow::new(bptt_steps)?;

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
            window,
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

    /// Truncation depth (the window's capacity).
    pub fn bptt_steps(&self) -> usize {
        self.window.capacity()
    }

    /// Number of features currently held in the window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// The carried recurrent state, if initialized.
    pub fn state(&self) -> Option<&Tensor<B, 2>> {
        self.state.as_ref()
    }

    /// Install a fresh zero state for the given batch size and drop the
    /// feature window's contents.
    pub fn reset(&mut self, batch_size: usize) {
        self.window.clear();
        self.state = Some(Tensor::zeros(
            [batch_size, self.cell.state_size()],
            &self.device,
        ));
    }

    /// Perform a forward pass, advancing the truncation window by one step.
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

        if self.window.push(features).is_some() {
            trace!("window full, evicted oldest feature");
        }

        // Progress the carried state by exactly one window entry; gradients
        // stop at the stored copy.
        let mut entries = self.window.iter();
        let oldest = entries
            .next()
            .expect("window holds at least the entry just pushed");
        let (mut output, new_state) = self.cell.forward(oldest.clone(), state);
        self.state = Some(new_state.clone().detach());

        // Replay the rest of the window with gradients attached.
        let mut chain_state = new_state;
        for feature in entries {
            let (out, next_state) = self.cell.forward(feature.clone(), chain_state);
            output = out;
            chain_state = next_state;
        }

        self.head.forward(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn make_wrapper(bptt_steps: usize) -> MultiStepConv<TestBackend> {
        let device = Default::default();
        let conv = ConvStack::trpo((1, 12, 12), 10, &device);
        let cell = GruCell::new(10, 10, &device);
        MultiStepConv::new(conv, cell, 4, bptt_steps, &device).unwrap()
    }

    fn random_input() -> Tensor<TestBackend, 4> {
        let device = Default::default();
        Tensor::random(
            [2, 1, 12, 12],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        )
    }

    #[test]
    fn test_multi_step_rejects_zero_bptt_steps() {
        let device = Default::default();
        let conv = ConvStack::<TestBackend>::trpo((1, 12, 12), 10, &device);
        let cell = GruCell::new(10, 10, &device);

        let result = MultiStepConv::new(conv, cell, 4, 0, &device);

        assert!(matches!(result, Err(ModelError::ZeroCapacity)));
    }

    #[test]
    fn test_multi_step_rejects_width_mismatch() {
        let device = Default::default();
        let conv = ConvStack::<TestBackend>::trpo((1, 12, 12), 10, &device);
        let cell = GruCell::new(12, 12, &device);

        let result = MultiStepConv::new(conv, cell, 4, 6, &device);

        assert!(matches!(result, Err(ModelError::SizeMismatch { .. })));
    }

    #[test]
    fn test_multi_step_window_length_is_min_of_calls_and_capacity() {
        let mut wrapper = make_wrapper(3);

        for call in 1..=5 {
            wrapper.forward(random_input());
            assert_eq!(wrapper.window_len(), call.min(3));
        }
    }

    #[test]
    fn test_multi_step_forward_shapes() {
        let mut wrapper = make_wrapper(6);

        for _ in 0..3 {
            let output = wrapper.forward(random_input());
            assert_eq!(output.dims(), [2, 4]);
        }

        assert_eq!(wrapper.state().unwrap().dims(), [2, 10]);
    }

    #[test]
    fn test_multi_step_reset_clears_window_and_state() {
        let mut wrapper = make_wrapper(3);

        for _ in 0..4 {
            wrapper.forward(random_input());
        }

        wrapper.reset(2);

        assert_eq!(wrapper.window_len(), 0);
        let state = wrapper.state().unwrap();
        assert_eq!(state.dims(), [2, 10]);
        assert_eq!(state.clone().abs().sum().into_scalar(), 0.0);
    }
}
