//! # Stateful Recurrent Wrappers
//!
//! Wrappers that carry recurrent state across repeated forward calls, for
//! agents that see one observation batch per environment step.
//!
//! ## Available Wrappers
//!
//! | Wrapper | Input | Gradient Depth |
//! |---------|-------|----------------|
//! | [`RecurrentConv`] | image batch | unbounded (graph grows per call) |
//! | [`MultiStepConv`] | image batch | truncated to `bptt_steps` |
//! | [`StatefulGru`] | feature batch | unbounded (graph grows per call) |
//!
//! ## State Machine
//!
//! Every wrapper starts **uninitialized** and transitions to **initialized**
//! either on its first forward call (state sized to the incoming batch) or
//! through an explicit `reset(batch_size)`. The state then persists for the
//! wrapper's lifetime; `reset` is also the way to start a new episode with a
//! different batch size.
//!
//! Forward calls take `&mut self`: the state advances in place, so a
//! wrapper belongs to exactly one rollout loop at a time.
//!
//! ## Truncated BPTT
//!
//! [`MultiStepConv`] is the variant to use for long rollouts: it keeps a
//! bounded FIFO window ([`BpttWindow`]) of recent convolutional features and
//! detaches the carried state once per call, which caps the
//! backpropagation depth at the window capacity no matter how many steps
//! the rollout has taken.
//!
//! ```ignore
//! use rlnets::prelude::*;
//!
//! let conv = ConvStack::<Backend>::trpo((1, 32, 32), 10, &device);
//! let cell = GruCell::new(10, 10, &device);
//! let mut model = MultiStepConv::new(conv, cell, n_actions, 6, &device)?;
//!
//! loop {
//!     let action_values = model.forward(observation_batch.clone());
//!     // hand action_values to the policy / loss
//! }
//! ```

pub mod multi_step;
pub mod recurrent_conv;
pub mod stateful_gru;
pub mod window;

pub use multi_step::MultiStepConv;
pub use recurrent_conv::RecurrentConv;
pub use stateful_gru::StatefulGru;
pub use window::BpttWindow;
