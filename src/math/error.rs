use thiserror::Error;

/// Failures of the tick and amount math.
///
/// All variants are deterministic input errors. They are never transient and
/// retrying the same call yields the same error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Tick outside `[MIN_TICK, MAX_TICK]`.
    #[error("tick {0} is outside the valid tick range")]
    InvalidTick(i32),
    /// A zero sqrt ratio, a zero denominator, or a ratio outside the
    /// representable price range.
    #[error("invalid sqrt price ratio")]
    InvalidRatio,
    /// An intermediate or final value does not fit in 256 bits.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    /// Position range with `lower > upper`.
    #[error("invalid tick range: lower {lower} > upper {upper}")]
    InvalidRange { lower: i32, upper: i32 },
}
