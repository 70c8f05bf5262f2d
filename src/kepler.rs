use nalgebra::Vector3;

use crate::constants::{Days, Radian, DPI};
use crate::orbital_elements::OrbitalElements;

/// Returns the principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Stopping policy of a bounded iterative solve.
///
/// Solvers stop as soon as the last update falls below `tolerance`, and give up
/// after `max_iter` iterations, returning their best estimate with a cleared
/// convergence flag rather than failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationPolicy {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl IterationPolicy {
    /// Default policy for the Kepler-equation solve (`tolerance` in radians).
    pub const KEPLER: IterationPolicy = IterationPolicy {
        tolerance: 1e-10,
        max_iter: 50,
    };

    /// Default policy for the light-travel fixed point (`tolerance` in days).
    pub const LIGHT_TRAVEL: IterationPolicy = IterationPolicy {
        tolerance: 1e-10,
        max_iter: 50,
    };
}

/// Solve Kepler's equation `M = E − e·sin(E)` for the eccentric anomaly.
///
/// Newton's method seeded with `E₀ = M + e·sin(M)`. Circular orbits skip the
/// iteration entirely: `E = M` is exact for `e == 0` and must not pick up
/// numerical noise from the solver.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly in radians (any value, wrapped internally)
/// * `eccentricity`: orbital eccentricity, in [0, 1)
/// * `policy`: stopping tolerance (radians) and iteration cap
///
/// Return
/// ----------
/// * `(E, converged)`: the eccentric anomaly estimate and whether the last
///   Newton step fell below the tolerance before the cap was reached.
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64, policy: &IterationPolicy) -> (Radian, bool) {
    let m = principal_angle(mean_anomaly);
    if eccentricity == 0.0 {
        return (m, true);
    }

    let e = eccentricity;
    let mut ecc_anom = m + e * m.sin();
    for _ in 0..policy.max_iter {
        let residual = ecc_anom - e * ecc_anom.sin() - m;
        let slope = 1.0 - e * ecc_anom.cos();
        let delta = residual / slope;
        ecc_anom -= delta;
        if delta.abs() < policy.tolerance {
            return (ecc_anom, true);
        }
    }
    (ecc_anom, false)
}

/// True anomaly from eccentric anomaly via the half-angle relation
/// `tan(f/2) = √((1+e)/(1−e))·tan(E/2)`, evaluated with `atan2` so that
/// `f` stays on the same branch as `E`.
pub fn eccentric_to_true(ecc_anom: Radian, eccentricity: f64) -> Radian {
    let (sin_half, cos_half) = (ecc_anom / 2.0).sin_cos();
    2.0 * ((1.0 + eccentricity).sqrt() * sin_half).atan2((1.0 - eccentricity).sqrt() * cos_half)
}

/// Barycentric position of a body at time `t` (no light-travel correction).
///
/// Solves Kepler's equation at `t`, converts to true anomaly and radius
/// `r = a·(1 − e·cos E)`, then rotates the in-plane position through the
/// argument of periastron ω, the inclination i and the node longitude Ω:
///
/// ```text
/// x = r·(cos Ω·cos u − sin Ω·sin u·cos i)
/// y = r·(sin Ω·cos u + cos Ω·sin u·cos i)
/// z = r·sin u·sin i            with u = ω + f
/// ```
///
/// The observer lies along +z: `z > 0` is in front of the barycenter
/// (candidate transit), `z < 0` behind it (candidate eclipse). Downstream
/// flux consumers rely on this sign exactly.
///
/// Return
/// ----------
/// * `(position, converged)`: position in primary radii, and whether the
///   Kepler solve converged within the policy (a cleared flag still carries
///   the best available estimate).
pub fn barycentric_position(
    t: Days,
    elements: &OrbitalElements,
    policy: &IterationPolicy,
) -> (Vector3<f64>, bool) {
    let e = elements.eccentricity;
    let m = elements.mean_anomaly_at(t);
    let (ecc_anom, converged) = solve_kepler(m, e, policy);
    let true_anom = eccentric_to_true(ecc_anom, e);
    let r = elements.semi_major_axis * (1.0 - e * ecc_anom.cos());

    let u = elements.periastron_argument.to_radians() + true_anom;
    let (sin_u, cos_u) = u.sin_cos();
    let (sin_node, cos_node) = elements.ascending_node_longitude.to_radians().sin_cos();
    let (sin_inc, cos_inc) = elements.inclination.to_radians().sin_cos();

    let position = Vector3::new(
        r * (cos_node * cos_u - sin_node * sin_u * cos_inc),
        r * (sin_node * cos_u + cos_node * sin_u * cos_inc),
        r * sin_u * sin_inc,
    );
    (position, converged)
}
