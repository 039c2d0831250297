//! Collision models.

use crate::descriptor::{self, Q};

/// A local collision model. Implementations relax one cell's distributions
/// in place; the slice always holds `Q` values.
pub trait Dynamics: Sync {
    fn collide(&self, f: &mut [f64]);
}

/// Single-relaxation-time (BGK) collision.
pub struct BgkDynamics {
    omega: f64,
}

impl BgkDynamics {
    /// `omega` is the relaxation parameter; it must lie in (0, 2] for the
    /// relaxation toward equilibrium to be stable.
    pub fn new(omega: f64) -> Self {
        assert!(
            omega > 0.0 && omega <= 2.0,
            "relaxation parameter must lie in (0, 2], got {omega}"
        );
        Self { omega }
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }
}

impl Dynamics for BgkDynamics {
    fn collide(&self, f: &mut [f64]) {
        let (rho, u) = descriptor::moments(f);
        for (i, fi) in f.iter_mut().enumerate().take(Q) {
            let feq = descriptor::equilibrium(i, rho, u);
            *fi -= self.omega * (*fi - feq);
        }
    }
}
