use serde::{Deserialize, Serialize};

use crate::constants::{Days, Degree, Radian, StellarRadius, DPI};
use crate::kepler::principal_angle;
use crate::keplight_errors::KeplightError;

/// Keplerian orbital elements of a body orbiting the system barycenter.
///
/// Units:
/// * `period`: days
/// * `semi_major_axis`: primary radii
/// * `eccentricity`: unitless, in [0, 1) (bound orbits only)
/// * `inclination`: degrees, in [0, 180] (0 = face-on, 90 = edge-on)
/// * `periastron_argument`: degrees
/// * `ascending_node_longitude`: degrees
/// * `reference_epoch`: days (epoch of periastron: the mean anomaly is zero there)
///
/// Fields are public and may be mutated between `compute` calls; the orchestrator
/// re-validates them at the start of every computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub period: Days,
    pub semi_major_axis: StellarRadius,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub periastron_argument: Degree,
    pub ascending_node_longitude: Degree,
    pub reference_epoch: Days,
}

impl Default for OrbitalElements {
    /// A circular, edge-on one-day orbit transiting at `t = 0`.
    fn default() -> Self {
        OrbitalElements {
            period: 1.0,
            semi_major_axis: 50.0,
            eccentricity: 0.0,
            inclination: 90.0,
            periastron_argument: 90.0,
            ascending_node_longitude: 0.0,
            reference_epoch: 0.0,
        }
    }
}

impl OrbitalElements {
    pub fn new(
        period: Days,
        semi_major_axis: StellarRadius,
        eccentricity: f64,
        inclination: Degree,
        periastron_argument: Degree,
        ascending_node_longitude: Degree,
        reference_epoch: Days,
    ) -> Result<Self, KeplightError> {
        let elements = OrbitalElements {
            period,
            semi_major_axis,
            eccentricity,
            inclination,
            periastron_argument,
            ascending_node_longitude,
            reference_epoch,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Check that the elements describe a bound, well-posed orbit.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` if all elements are finite and within range,
    ///   otherwise the first violation found.
    pub fn validate(&self) -> Result<(), KeplightError> {
        finite("period", self.period)?;
        finite("semi_major_axis", self.semi_major_axis)?;
        finite("eccentricity", self.eccentricity)?;
        finite("inclination", self.inclination)?;
        finite("periastron_argument", self.periastron_argument)?;
        finite("ascending_node_longitude", self.ascending_node_longitude)?;
        finite("reference_epoch", self.reference_epoch)?;

        if self.period <= 0.0 {
            return Err(KeplightError::NonPositivePeriod(self.period));
        }
        if self.semi_major_axis <= 0.0 {
            return Err(KeplightError::NonPositiveSemiMajorAxis(self.semi_major_axis));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(KeplightError::EccentricityOutOfRange(self.eccentricity));
        }
        if !(0.0..=180.0).contains(&self.inclination) {
            return Err(KeplightError::InclinationOutOfRange(self.inclination));
        }
        Ok(())
    }

    /// Mean anomaly at time `t` (days), wrapped to [0, 2π).
    pub fn mean_anomaly_at(&self, t: Days) -> Radian {
        principal_angle(DPI * (t - self.reference_epoch) / self.period)
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), KeplightError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(KeplightError::NonFiniteElement { name, value })
    }
}

#[cfg(test)]
mod test_orbital_elements {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_validation_ranges() {
        assert_eq!(
            OrbitalElements::new(0.0, 22.0, 0.0, 90.0, 90.0, 0.0, 0.0),
            Err(KeplightError::NonPositivePeriod(0.0))
        );
        assert_eq!(
            OrbitalElements::new(10.0, -1.0, 0.0, 90.0, 90.0, 0.0, 0.0),
            Err(KeplightError::NonPositiveSemiMajorAxis(-1.0))
        );
        assert_eq!(
            OrbitalElements::new(10.0, 22.0, 1.0, 90.0, 90.0, 0.0, 0.0),
            Err(KeplightError::EccentricityOutOfRange(1.0))
        );
        assert_eq!(
            OrbitalElements::new(10.0, 22.0, 0.0, 181.0, 90.0, 0.0, 0.0),
            Err(KeplightError::InclinationOutOfRange(181.0))
        );
        assert!(OrbitalElements::new(10.0, 22.0, 0.999, 180.0, 270.0, 360.0, -3.5).is_ok());
    }

    #[test]
    fn test_validation_rejects_non_finite() {
        let mut elements = OrbitalElements::default();
        elements.eccentricity = f64::NAN;
        assert!(matches!(
            elements.validate(),
            Err(KeplightError::NonFiniteElement {
                name: "eccentricity",
                ..
            })
        ));

        let mut elements = OrbitalElements::default();
        elements.period = f64::INFINITY;
        assert!(matches!(
            elements.validate(),
            Err(KeplightError::NonFiniteElement { name: "period", .. })
        ));
    }

    #[test]
    fn test_mean_anomaly_wrapping() {
        let elements = OrbitalElements::default();
        assert_eq!(elements.mean_anomaly_at(0.0), 0.0);
        assert_eq!(elements.mean_anomaly_at(0.25), FRAC_PI_2);
        // One full period later, same principal value.
        assert_eq!(elements.mean_anomaly_at(1.25), FRAC_PI_2);
        // Times before the reference epoch wrap into [0, 2π).
        let m = elements.mean_anomaly_at(-0.25);
        assert!((m - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }
}
