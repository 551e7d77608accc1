//! # rlnets - Architecture Builders for RL Agents
//!
//! A small library of neural-network architecture builders meant to be
//! composed into reinforcement-learning agents, built on the Burn framework.
//!
//! ## Features
//!
//! - **Mlp**: feed-forward stacks with configurable hidden widths
//! - **ConvStack**: convolutional stacks with per-stage stride/channel/filter
//!   hyperparameters, plus the classic pixel-input presets
//! - **SimpleConvNet**: single-convolution variant for flat observations
//! - **Recurrent wrappers**: stateful GRU-based wrappers carrying recurrent
//!   state across environment steps, including a truncated-BPTT variant that
//!   bounds gradient depth on long rollouts
//!
//! There is no training loop, optimizer, or environment code here: builders
//! assemble Burn modules, wrappers book-keep recurrent state, and everything
//! numerical is Burn's job. Plug the resulting models into whatever rollout
//! and optimization machinery you already have.
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use rlnets::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! // A DQN-style action-value network over 84x84 4-frame observations.
//! let net = ConvStack::<Backend>::dqn((4, 84, 84), 6, &device);
//!
//! let observations = Tensor::<Backend, 4>::zeros([2, 4, 84, 84], &device);
//! let action_values = net.forward(observations);
//! assert_eq!(action_values.dims(), [2, 6]);
//! ```
//!
//! ## Recurrent Models
//!
//! For partially observable tasks, wrap a convolutional stack and a
//! [`GruCell`](cells::GruCell) into one of the stateful wrappers in
//! [`rnn`]; see that module's docs for the state-machine contract and the
//! truncated-BPTT semantics.

pub mod cells;
pub mod conv;
pub mod error;
pub mod mlp;
pub mod rnn;

pub mod prelude {
    pub use crate::cells::{GruCell, RecurrentCell};
    pub use crate::conv::{max_pool2d, ConvPreset, ConvStack, SimpleConvNet};
    pub use crate::error::{ModelError, Result};
    pub use crate::mlp::Mlp;
    pub use crate::rnn::{BpttWindow, MultiStepConv, RecurrentConv, StatefulGru};
}

pub use error::{ModelError, Result};
pub use mlp::Mlp;
