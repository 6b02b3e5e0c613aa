/// Evaluates a physical model for one input.
///
/// Models are pure from the solver's point of view: calling twice with the
/// same input must give the same output.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model.
    ///
    /// # Errors
    ///
    /// Returns the model's own error type, which solvers pass through
    /// unchanged.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// An input together with the output the model produced for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    #[must_use]
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}
