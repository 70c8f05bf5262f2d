//! # System: bodies, trajectories, and the compute entry point
//!
//! This module defines the [`System`] struct, the central façade that wires together:
//!
//! 1. **Bodies** ([`Body`]) — the central body plus any number of orbiting bodies,
//!    each carrying a radius and (for orbiting bodies) a set of
//!    [`OrbitalElements`](crate::orbital_elements::OrbitalElements).
//! 2. **Light-travel correction** — each apparent position corresponds to where
//!    the body *was* when the light now arriving was emitted
//!    ([`emission_time`](crate::light_travel::emission_time)).
//! 3. **Computed trajectories** ([`Trajectory`]) — per-body `x`, `y`, `z` arrays
//!    aligned index-for-index with the times of the last [`compute`](System::compute) call.
//!
//! The design emphasizes *explicit re-derivation*: `scale`, the iteration policies,
//! and every body's elements are public, may be mutated between calls, and are
//! re-read and re-validated at the start of every computation. No incremental state
//! survives a parameter change, so repeated calls with identical inputs are
//! bit-identical.
//!
//! ## Typical usage
//!
//! ```rust
//! use keplight::orbital_elements::OrbitalElements;
//! use keplight::system::{Body, System};
//!
//! let planet = Body::orbiting(
//!     0.1,
//!     OrbitalElements {
//!         period: 10.0,
//!         semi_major_axis: 22.0,
//!         ..OrbitalElements::default()
//!     },
//! ).unwrap();
//!
//! let mut system = System::new(vec![Body::central(1.0), planet], 1.0).unwrap();
//! let times: Vec<f64> = (0..1000).map(|k| 10.0 * k as f64 / 1000.0).collect();
//! system.compute(&times).unwrap();
//!
//! let trajectory = system.positions(1).unwrap();
//! assert_eq!(trajectory.z.len(), times.len());
//! ```
//!
//! ## Errors & warnings
//!
//! - Structurally invalid input (bad elements, negative scale, non-finite times)
//!   aborts [`compute`](System::compute) with a
//!   [`KeplightError`](crate::keplight_errors::KeplightError) before any solving.
//! - Iteration caps are non-fatal: affected samples keep their best estimates,
//!   their indices are recorded in [`Trajectory::underconverged`], and a
//!   `tracing` warning is emitted once per body.

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::constants::{Days, StellarRadius};
use crate::kepler::{barycentric_position, IterationPolicy};
use crate::keplight_errors::KeplightError;
use crate::light_travel::emission_time;
use crate::orbital_elements::OrbitalElements;

/// One member of the system: the central body (`orbit == None`, pinned at the
/// origin) or an orbiting body. The radius is expressed in units of the
/// primary's radius and is passed through untouched for flux consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub radius: StellarRadius,
    pub orbit: Option<OrbitalElements>,
}

impl Body {
    /// The central body, fixed at the barycenter at this layer (stellar reflex
    /// motion is out of scope).
    pub fn central(radius: StellarRadius) -> Self {
        Body {
            radius,
            orbit: None,
        }
    }

    /// An orbiting body; the elements are validated eagerly.
    pub fn orbiting(radius: StellarRadius, elements: OrbitalElements) -> Result<Self, KeplightError> {
        elements.validate()?;
        Ok(Body {
            radius,
            orbit: Some(elements),
        })
    }
}

/// Apparent barycentric trajectory of one body, aligned index-for-index with
/// the times of the last `compute` call. `z > 0` is in front of the barycenter
/// (candidate transit), `z < 0` behind it (candidate eclipse).
///
/// `underconverged` lists the sample indices where an iteration cap was hit
/// before tolerance; those samples hold best estimates, not garbage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub underconverged: Vec<usize>,
}

impl Trajectory {
    fn reset(&mut self, capacity: usize) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
        self.underconverged.clear();
        self.x.reserve(capacity);
        self.y.reserve(capacity);
        self.z.reserve(capacity);
    }

    fn push(&mut self, x: f64, y: f64, z: f64) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }
}

/// A star and its orbiting bodies, with the global length scale and the
/// compute entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    /// Conversion from primary radii to solar radii; `0` disables the
    /// light-travel delay entirely (instantaneous-light mode).
    pub scale: f64,
    /// Policy of every Kepler-equation solve.
    pub kepler_policy: IterationPolicy,
    /// Policy of the light-travel fixed point.
    pub delay_policy: IterationPolicy,
    bodies: Vec<Body>,
    trajectories: Vec<Trajectory>,
}

impl System {
    /// Build a system from an ordered body list (central body first by
    /// convention; the order only matters for output association).
    pub fn new(bodies: Vec<Body>, scale: f64) -> Result<Self, KeplightError> {
        validate_scale(scale)?;
        for body in &bodies {
            if let Some(orbit) = &body.orbit {
                orbit.validate()?;
            }
        }
        let trajectories = vec![Trajectory::default(); bodies.len()];
        Ok(System {
            scale,
            kepler_policy: IterationPolicy::KEPLER,
            delay_policy: IterationPolicy::LIGHT_TRAVEL,
            bodies,
            trajectories,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Result<&Body, KeplightError> {
        self.bodies.get(index).ok_or(KeplightError::BodyIndexOutOfRange {
            index,
            len: self.bodies.len(),
        })
    }

    /// Mutable access, e.g. to change an orbit's inclination between
    /// `compute` calls. The next `compute` re-validates the elements.
    pub fn body_mut(&mut self, index: usize) -> Result<&mut Body, KeplightError> {
        let len = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(KeplightError::BodyIndexOutOfRange { index, len })
    }

    /// Trajectory of the body at `index`, aligned with the last `compute` call
    /// (empty before the first call).
    pub fn positions(&self, index: usize) -> Result<&Trajectory, KeplightError> {
        self.trajectories
            .get(index)
            .ok_or(KeplightError::BodyIndexOutOfRange {
                index,
                len: self.bodies.len(),
            })
    }

    /// Compute the apparent barycentric position of every body at every
    /// observation epoch, fully replacing the previous trajectories.
    ///
    /// All configuration is re-read here: fail-fast validation of the scale,
    /// the times, and every body's elements happens before any solving, so a
    /// structurally invalid orbit can never produce NaN positions. Iteration
    /// caps during solving are non-fatal (see [`Trajectory::underconverged`]).
    pub fn compute(&mut self, times: &[Days]) -> Result<(), KeplightError> {
        validate_scale(self.scale)?;
        if let Some((index, &value)) = times.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(KeplightError::NonFiniteTime { index, value });
        }
        for body in &self.bodies {
            if let Some(orbit) = &body.orbit {
                orbit.validate()?;
            }
        }

        for (index, (body, trajectory)) in
            izip!(&self.bodies, &mut self.trajectories).enumerate()
        {
            trajectory.reset(times.len());
            match &body.orbit {
                None => {
                    trajectory.x.resize(times.len(), 0.0);
                    trajectory.y.resize(times.len(), 0.0);
                    trajectory.z.resize(times.len(), 0.0);
                }
                Some(elements) => {
                    for (sample, &t_obs) in times.iter().enumerate() {
                        let (t_emit, delay_ok) = emission_time(
                            t_obs,
                            self.scale,
                            elements,
                            &self.kepler_policy,
                            &self.delay_policy,
                        );
                        let (position, kepler_ok) =
                            barycentric_position(t_emit, elements, &self.kepler_policy);
                        trajectory.push(position.x, position.y, position.z);
                        if !(delay_ok && kepler_ok) {
                            trajectory.underconverged.push(sample);
                        }
                    }
                }
            }
            if !trajectory.underconverged.is_empty() {
                tracing::warn!(
                    body = index,
                    samples = trajectory.underconverged.len(),
                    "iteration cap reached before tolerance; kept best estimates"
                );
            }
        }
        Ok(())
    }
}

fn validate_scale(scale: f64) -> Result<(), KeplightError> {
    if scale.is_finite() && scale >= 0.0 {
        Ok(())
    } else {
        Err(KeplightError::InvalidScale(scale))
    }
}
