//! D3Q19 descriptor: discrete velocities, quadrature weights, and the
//! opposite-direction table.

/// Number of discrete velocities per cell.
pub const Q: usize = 19;

/// Discrete velocities `[ex, ey, ez]`.
pub const VELOCITIES: [[i32; 3]; Q] = [
    [0, 0, 0], // rest
    [1, 0, 0], // face-centered
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [1, 1, 0], // edge-centered
    [-1, -1, 0],
    [1, -1, 0],
    [-1, 1, 0],
    [1, 0, 1],
    [-1, 0, -1],
    [1, 0, -1],
    [-1, 0, 1],
    [0, 1, 1],
    [0, -1, -1],
    [0, 1, -1],
    [0, -1, 1],
];

/// Quadrature weights: 1/3 rest, 1/18 face, 1/36 edge.
pub const WEIGHTS: [f64; Q] = [
    1.0 / 3.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// Index of the direction opposite to `i`.
pub const OPPOSITE: [usize; Q] = [
    0, 2, 1, 4, 3, 6, 5, 8, 7, 10, 9, 12, 11, 14, 13, 16, 15, 18, 17,
];

/// Second-order equilibrium distribution for direction `i` at the given
/// density and velocity.
#[inline]
pub fn equilibrium(i: usize, rho: f64, u: [f64; 3]) -> f64 {
    let e = VELOCITIES[i];
    let eu = e[0] as f64 * u[0] + e[1] as f64 * u[1] + e[2] as f64 * u[2];
    let uu = u[0] * u[0] + u[1] * u[1] + u[2] * u[2];
    WEIGHTS[i] * rho * (1.0 + 3.0 * eu + 4.5 * eu * eu - 1.5 * uu)
}

/// Macroscopic moments (density, velocity) of one cell's distributions.
/// `f` must hold `Q` values.
#[inline]
pub fn moments(f: &[f64]) -> (f64, [f64; 3]) {
    let mut rho = 0.0;
    let mut momentum = [0.0; 3];
    for (fi, e) in f.iter().zip(VELOCITIES.iter()) {
        rho += fi;
        momentum[0] += fi * e[0] as f64;
        momentum[1] += fi * e[1] as f64;
        momentum[2] += fi * e[2] as f64;
    }
    if rho.abs() < 1e-12 {
        return (rho, [0.0; 3]);
    }
    (
        rho,
        [momentum[0] / rho, momentum[1] / rho, momentum[2] / rho],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = WEIGHTS.iter().sum();
        assert!((total - 1.0).abs() < 1e-15);
    }

    #[test]
    fn opposite_table_is_an_involution_that_negates_velocities() {
        for i in 0..Q {
            let opp = OPPOSITE[i];
            assert_eq!(OPPOSITE[opp], i);
            for axis in 0..3 {
                assert_eq!(VELOCITIES[opp][axis], -VELOCITIES[i][axis]);
            }
        }
    }

    #[test]
    fn equilibrium_at_rest_matches_weights() {
        for i in 0..Q {
            assert_eq!(equilibrium(i, 1.0, [0.0; 3]), WEIGHTS[i]);
        }
    }

    #[test]
    fn moments_recover_equilibrium_inputs() {
        let rho = 1.2;
        let u = [0.03, -0.01, 0.02];
        let cell: Vec<f64> = (0..Q).map(|i| equilibrium(i, rho, u)).collect();
        let (rho_out, u_out) = moments(&cell);
        assert!((rho_out - rho).abs() < 1e-12);
        for axis in 0..3 {
            assert!((u_out[axis] - u[axis]).abs() < 1e-12);
        }
    }
}
