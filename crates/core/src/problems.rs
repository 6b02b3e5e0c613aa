pub mod equation;
pub mod fixed_point;

pub use equation::EquationProblem;
pub use fixed_point::FixedPointProblem;
