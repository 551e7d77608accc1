//! # Recurrent Cells
//!
//! Single-timestep recurrent cells and the [`RecurrentCell`] seam the
//! stateful wrappers in [`crate::rnn`] are built against.
//!
//! A cell maps `(input, state)` to `(output, new_state)` with explicit state
//! in and state out; nothing is registered anywhere behind the caller's back,
//! so the owner of the state decides where it lives and when it resets.
//!
//! ## Tensor Shapes
//!
//! All cells expect 2D tensors for single-timestep processing:
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `input` | `[batch, input_size]` |
//! | `state` | `[batch, state_size]` |
//! | `output` | `[batch, output_size]` |
//! | `new_state` | `[batch, state_size]` |
//!
//! [`GruCell`] is the cell shipped with the crate; any other implementation
//! of [`RecurrentCell`] plugs into the wrappers the same way.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

pub mod gru_cell;

pub use gru_cell::GruCell;

/// A recurrent-cell capability: one timestep per call, state passed
/// explicitly.
pub trait RecurrentCell<B: Backend> {
    /// Width of the input the cell consumes.
    fn input_size(&self) -> usize;

    /// Width of the recurrent state.
    fn state_size(&self) -> usize;

    /// Width of the cell output. Defaults to the state width, which holds
    /// for gated cells whose output is the new state.
    fn output_size(&self) -> usize {
        self.state_size()
    }

    /// Apply the cell to one timestep.
    fn forward(&self, input: Tensor<B, 2>, state: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 2>);
}
