/// Defines a fixed-point problem `x = G(x)` to be solved.
///
/// A fixed-point problem maps solver variables to a model input, calls the
/// model, and maps the model input/output back to an updated estimate
/// `G(x)`. Solvers iterate until `G(x)` agrees with `x`.
///
/// The const generic `N` is the number of solver variables.
pub trait FixedPointProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes the updated estimate `G(x)` from model input/output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the update cannot be computed.
    fn update(&self, input: &Self::Input, output: &Self::Output)
    -> Result<[f64; N], Self::Error>;
}
