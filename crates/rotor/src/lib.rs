//! Blade-element/momentum (BEM) performance solver for horizontal-axis rotors.
//!
//! A rotor is described by a [`RotorGeometry`] (normalized annuli with chord,
//! twist and airfoil) and an [`AirfoilLibrary`] of tabulated polars. For each
//! [`OperatingCondition`] the [`RotorSolver`] finds the axial and tangential
//! induction of every annulus by a relaxed fixed-point iteration that couples
//! blade-element loads with a [`MomentumModel`], then integrates the local
//! loads into rotor thrust, power and torque coefficients.
//!
//! All quantities inside the solver are normalized by the freestream speed and
//! the rotor radius. Dimensional inputs (`uom` lengths, angles and speeds)
//! appear only at the configuration boundary.
//!
//! # Example
//!
//! ```
//! use bemrotor::{
//!     AirfoilLibrary, Annulus, ClassicalMomentum, OperatingCondition, Polar, PolarTable,
//!     RotorGeometry, RotorOptions, RotorSolver, polar::Extrapolate,
//! };
//! use uom::si::{angle::radian, f64::{Angle, Length}, length::meter};
//!
//! let alpha = vec![-0.5, 0.5];
//! let table = PolarTable::new(
//!     alpha.clone(),
//!     alpha.iter().map(|a| 2.0 * std::f64::consts::PI * a).collect(),
//!     vec![0.01, 0.01],
//!     Extrapolate::Clamp,
//! )?;
//!
//! let mut library = AirfoilLibrary::new();
//! library.insert("flat", Polar::single(table));
//!
//! let annuli = (0..4)
//!     .map(|i| Annulus {
//!         mu: 0.2 + 0.2 * f64::from(i),
//!         width: 0.2,
//!         chord: 0.06,
//!         twist: 0.05,
//!         airfoil: "flat".into(),
//!     })
//!     .collect();
//! let geometry = RotorGeometry::new(Length::new::<meter>(40.0), 3, annuli)?;
//!
//! let solver = RotorSolver::new(
//!     geometry,
//!     library,
//!     ClassicalMomentum::default(),
//!     RotorOptions::default(),
//! )?;
//!
//! let zero = Angle::new::<radian>(0.0);
//! let solution = solver.solve(&OperatingCondition::new(6.0, zero, zero)?)?;
//! assert!(solution.ct > 0.0 && solution.cp > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod annulus;
pub mod blade_element;
pub mod error;
pub mod geometry;
pub mod momentum;
pub mod operating;
pub mod polar;
pub mod rotor;
pub mod tangential;
pub mod tip_loss;

pub use annulus::{AnnulusConfig, AnnulusSolution, AnnulusSolver, InductionState};
pub use blade_element::{AnnulusLoads, BladeElement, ElementLoads};
pub use error::{AnnulusError, ConfigurationError, ConvergenceError, Error, LookupError};
pub use geometry::{Annulus, BladeDefinition, BladeStation, RotorGeometry};
pub use momentum::{
    ClassicalMomentum, ConstantInduction, DiscSolution, Heck, HighThrustCorrection, LimitedHeck,
    MomentumError, MomentumModel,
};
pub use operating::{Inflow, OperatingCondition};
pub use polar::{AirfoilLibrary, Coefficients, Polar, PolarData, PolarTable};
pub use rotor::{
    AnnulusResult, OnError, Quadrature, RotorOptions, RotorSolution, RotorSolver, Sweep,
    SweepOptions, SweepPoint, pitch_conditions, tsr_conditions,
};
pub use tangential::TangentialInduction;
pub use tip_loss::TipLoss;
