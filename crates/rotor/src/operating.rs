//! Operating conditions: tip-speed ratio, pitch, yaw and optional inflow.

use std::{f64::consts::FRAC_PI_2, fmt};

use serde::{Deserialize, Serialize};
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, KinematicViscosity, Length, Velocity},
    kinematic_viscosity::square_meter_per_second,
    ratio::ratio,
    velocity::meter_per_second,
};

use crate::ConfigurationError;

/// Kinematic viscosity of air at 15 °C and sea level.
const AIR_KINEMATIC_VISCOSITY: f64 = 1.46e-5;

/// A single rotor operating point.
///
/// Yaw is limited to `|yaw| < 90°`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingCondition {
    tsr: f64,
    pitch: Angle,
    yaw: Angle,
    inflow: Option<Inflow>,
}

impl OperatingCondition {
    /// Creates a validated operating condition.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `tsr` is not finite and positive,
    /// `pitch` is not finite, or `yaw` is not strictly within ±90°.
    pub fn new(tsr: f64, pitch: Angle, yaw: Angle) -> Result<Self, ConfigurationError> {
        if !tsr.is_finite() || tsr <= 0.0 {
            return Err(ConfigurationError::InvalidTipSpeedRatio { value: tsr });
        }
        let pitch_rad = pitch.get::<radian>();
        if !pitch_rad.is_finite() {
            return Err(ConfigurationError::InvalidAngle {
                name: "pitch",
                value: pitch_rad,
            });
        }
        let yaw_rad = yaw.get::<radian>();
        if !(yaw_rad.abs() < FRAC_PI_2) {
            return Err(ConfigurationError::InvalidAngle {
                name: "yaw",
                value: yaw_rad,
            });
        }

        Ok(Self {
            tsr,
            pitch,
            yaw,
            inflow: None,
        })
    }

    /// Attaches dimensional inflow, enabling Reynolds-dependent polars.
    #[must_use]
    pub fn with_inflow(mut self, inflow: Inflow) -> Self {
        self.inflow = Some(inflow);
        self
    }

    /// Returns a copy with a different tip-speed ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if `tsr` is not finite and positive.
    pub fn with_tsr(self, tsr: f64) -> Result<Self, ConfigurationError> {
        let condition = Self::new(tsr, self.pitch, self.yaw)?;
        Ok(Self {
            inflow: self.inflow,
            ..condition
        })
    }

    /// Returns a copy with a different pitch.
    ///
    /// # Errors
    ///
    /// Returns an error if `pitch` is not finite.
    pub fn with_pitch(self, pitch: Angle) -> Result<Self, ConfigurationError> {
        let condition = Self::new(self.tsr, pitch, self.yaw)?;
        Ok(Self {
            inflow: self.inflow,
            ..condition
        })
    }

    #[must_use]
    pub fn tsr(&self) -> f64 {
        self.tsr
    }

    #[must_use]
    pub fn pitch(&self) -> Angle {
        self.pitch
    }

    #[must_use]
    pub fn yaw(&self) -> Angle {
        self.yaw
    }

    #[must_use]
    pub fn inflow(&self) -> Option<&Inflow> {
        self.inflow.as_ref()
    }

    #[must_use]
    pub fn is_yawed(&self) -> bool {
        self.yaw.get::<radian>() != 0.0
    }
}

impl fmt::Display for OperatingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tsr = {:.3}, pitch = {:.2}°, yaw = {:.2}°",
            self.tsr,
            self.pitch.get::<degree>(),
            self.yaw.get::<degree>(),
        )
    }
}

/// Freestream speed and fluid viscosity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inflow {
    pub wind_speed: Velocity,
    pub kinematic_viscosity: KinematicViscosity,
}

impl Inflow {
    /// Creates inflow of standard air.
    ///
    /// # Errors
    ///
    /// Returns an error if `wind_speed` is not finite and positive.
    pub fn air(wind_speed: Velocity) -> Result<Self, ConfigurationError> {
        Self::new(
            wind_speed,
            KinematicViscosity::new::<square_meter_per_second>(AIR_KINEMATIC_VISCOSITY),
        )
    }

    /// Creates validated inflow.
    ///
    /// # Errors
    ///
    /// Returns an error if either quantity is not finite and positive.
    pub fn new(
        wind_speed: Velocity,
        kinematic_viscosity: KinematicViscosity,
    ) -> Result<Self, ConfigurationError> {
        let speed = wind_speed.get::<meter_per_second>();
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigurationError::InvalidInflow { name: "wind speed" });
        }
        let nu = kinematic_viscosity.get::<square_meter_per_second>();
        if !nu.is_finite() || nu <= 0.0 {
            return Err(ConfigurationError::InvalidInflow {
                name: "kinematic viscosity",
            });
        }

        Ok(Self {
            wind_speed,
            kinematic_viscosity,
        })
    }

    /// Chord Reynolds number for a section seeing `relative_speed` times the
    /// freestream speed.
    #[must_use]
    pub fn reynolds(&self, relative_speed: f64, chord: Length) -> f64 {
        relative_speed * (self.wind_speed * chord / self.kinematic_viscosity).get::<ratio>()
    }
}
