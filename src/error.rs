use thiserror::Error;

/// Errors raised while assembling an architecture.
///
/// These cover constructor preconditions only. Shape violations during a
/// `forward` call (e.g. feeding an image of the wrong spatial size) surface
/// as panics from the underlying framework.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The three per-layer hyperparameter lists of a convolutional stack
    /// must describe the same number of layers.
    #[error(
        "hyperparameter lists must have equal lengths: \
         {strides} strides, {channels} channel counts, {filter_sizes} filter sizes"
    )]
    HyperparameterLengthMismatch {
        strides: usize,
        channels: usize,
        filter_sizes: usize,
    },

    /// A convolutional stack needs at least one layer.
    #[error("convolutional stack must have at least one layer")]
    EmptyStack,

    /// An input feature width of zero cannot be reshaped into an image.
    #[error("input feature width must be positive")]
    EmptyInput,

    /// Two wired components disagree on a tensor width.
    #[error("{context}: produced width {produced}, expected {expected}")]
    SizeMismatch {
        context: &'static str,
        produced: usize,
        expected: usize,
    },

    /// A truncation window of capacity zero would never hold a feature.
    #[error("window capacity must be at least 1")]
    ZeroCapacity,
}

/// Convenience alias for results carrying a [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
