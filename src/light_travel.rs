use crate::constants::{Days, LIGHT_DAYS_PER_RSUN};
use crate::kepler::{barycentric_position, IterationPolicy};
use crate::orbital_elements::OrbitalElements;

/// Self-consistent emission time for an observation epoch.
///
/// The light arriving at the (distant, +z) observer at `t_obs` was emitted when
/// the body was at its position at `t_emit`, where
///
/// ```text
/// t_emit = t_obs + z(t_emit) · scale · R_SUN / (c · 86400)
/// ```
///
/// relative to the barycenter (`z = 0` reference): a body in front of the
/// barycenter is seen early, a body behind it is seen late. The constant
/// barycenter–observer distance only shifts absolute phase and is never
/// modeled. Because the delay depends on the position at the (unknown)
/// emission time, the equation is implicit; it is resolved by fixed-point
/// iteration from `t_emit = t_obs`. The delay magnitude is bounded by
/// `a · scale · R_SUN / c` (seconds to minutes against day-scale periods), so
/// a handful of iterations suffices.
///
/// Arguments
/// ---------
/// * `t_obs`: observation epoch, days
/// * `scale`: length scale converting primary radii to solar radii; `0` is the
///   instantaneous-light mode and returns `t_obs` bit-exactly
/// * `elements`: the body's orbit
/// * `kepler_policy`: policy of the inner Kepler solves
/// * `delay_policy`: stopping tolerance (days) and cap of the fixed point
///
/// Return
/// ----------
/// * `(t_emit, converged)`: emission epoch in days; the flag is cleared if the
///   fixed point hit its cap or any inner Kepler solve underconverged, in which
///   case `t_emit` is still the best available estimate.
pub fn emission_time(
    t_obs: Days,
    scale: f64,
    elements: &OrbitalElements,
    kepler_policy: &IterationPolicy,
    delay_policy: &IterationPolicy,
) -> (Days, bool) {
    if scale == 0.0 {
        return (t_obs, true);
    }

    let delay_per_radius = scale * LIGHT_DAYS_PER_RSUN;
    let mut t_emit = t_obs;
    let mut kepler_ok = true;
    for _ in 0..delay_policy.max_iter {
        let (position, ok) = barycentric_position(t_emit, elements, kepler_policy);
        kepler_ok &= ok;
        let next = t_obs + position.z * delay_per_radius;
        let step = (next - t_emit).abs();
        t_emit = next;
        if step < delay_policy.tolerance {
            return (t_emit, kepler_ok);
        }
    }
    (t_emit, false)
}

#[cfg(test)]
mod test_light_travel {
    use super::*;
    use approx::assert_relative_eq;

    fn edge_on_circular() -> OrbitalElements {
        OrbitalElements {
            period: 10.0,
            semi_major_axis: 22.0,
            ..OrbitalElements::default()
        }
    }

    #[test]
    fn test_zero_scale_is_bit_exact() {
        let elements = edge_on_circular();
        for &t_obs in &[0.0, 0.1 + 0.2, 5.000000000000001, -3.75, 1e9] {
            let (t_emit, converged) = emission_time(
                t_obs,
                0.0,
                &elements,
                &IterationPolicy::KEPLER,
                &IterationPolicy::LIGHT_TRAVEL,
            );
            assert!(converged);
            assert_eq!(t_emit.to_bits(), t_obs.to_bits());
        }
    }

    #[test]
    fn test_emission_time_is_a_fixed_point() {
        let elements = edge_on_circular();
        let kepler = IterationPolicy::KEPLER;
        let delay = IterationPolicy::LIGHT_TRAVEL;
        for k in 0..40 {
            let t_obs = 10.0 * k as f64 / 40.0;
            let (t_emit, converged) = emission_time(t_obs, 1.0, &elements, &kepler, &delay);
            assert!(converged);
            let (position, _) = barycentric_position(t_emit, &elements, &kepler);
            let residual = t_emit - t_obs - position.z * LIGHT_DAYS_PER_RSUN;
            assert!(residual.abs() < delay.tolerance, "t_obs={t_obs}");
        }
    }

    #[test]
    fn test_delay_sign_at_conjunctions() {
        // In front of the barycenter (transit side, z = +a): light arrives
        // early, so the emission time lies ahead of the observation epoch.
        let elements = edge_on_circular();
        let kepler = IterationPolicy::KEPLER;
        let delay = IterationPolicy::LIGHT_TRAVEL;
        let one_way = 22.0 * LIGHT_DAYS_PER_RSUN;

        let (t_emit, _) = emission_time(10.0, 1.0, &elements, &kepler, &delay);
        assert_relative_eq!(t_emit - 10.0, one_way, max_relative = 1e-6);

        // Behind the barycenter (eclipse side, z = −a): seen late.
        let (t_emit, _) = emission_time(5.0, 1.0, &elements, &kepler, &delay);
        assert_relative_eq!(t_emit - 5.0, -one_way, max_relative = 1e-6);
    }

    #[test]
    fn test_cap_returns_best_estimate() {
        let starved = IterationPolicy {
            tolerance: 1e-16,
            max_iter: 2,
        };
        let (t_emit, converged) = emission_time(
            3.3,
            1.0,
            &edge_on_circular(),
            &IterationPolicy::KEPLER,
            &starved,
        );
        assert!(!converged);
        assert!(t_emit.is_finite());
    }
}
