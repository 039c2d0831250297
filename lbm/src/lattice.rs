use rayon::prelude::*;

use crate::descriptor::{self, Q, VELOCITIES, WEIGHTS};
use crate::dynamics::Dynamics;

/// Minimum cells per rayon work item; keeps per-task overhead negligible
/// against the 19-double cell kernel.
const MIN_CELLS_PER_TASK: usize = 1 << 12;

/// A 3D lattice of distribution functions, stored cell-major: the `Q`
/// values of cell `(x, y, z)` are contiguous.
pub struct Lattice3D<D: Dynamics> {
    nx: usize,
    ny: usize,
    nz: usize,
    dynamics: D,
    f: Vec<f64>,
    f_post: Vec<f64>,
}

impl<D: Dynamics> Lattice3D<D> {
    pub fn new(nx: usize, ny: usize, nz: usize, dynamics: D) -> Self {
        assert!(
            nx > 0 && ny > 0 && nz > 0,
            "lattice dimensions must be nonzero, got {nx}x{ny}x{nz}"
        );
        let len = nx * ny * nz * Q;
        Self {
            nx,
            ny,
            nz,
            dynamics,
            f: vec![0.0; len],
            f_post: vec![0.0; len],
        }
    }

    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    pub fn num_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    #[inline]
    fn cell(&self, x: usize, y: usize, z: usize) -> usize {
        (x + self.nx * (y + self.ny * z)) * Q
    }

    /// Set every cell to the equilibrium of a quiescent unit-density fluid.
    /// Touches both buffers, so all backing memory is committed after this
    /// returns.
    pub fn initialize(&mut self) {
        self.f
            .par_chunks_mut(Q)
            .with_min_len(MIN_CELLS_PER_TASK)
            .for_each(|cell| {
                for (fi, w) in cell.iter_mut().zip(WEIGHTS.iter()) {
                    *fi = *w;
                }
            });
        self.f_post.copy_from_slice(&self.f);
    }

    /// Set one cell to the equilibrium of the given density and velocity.
    pub fn set_equilibrium(&mut self, x: usize, y: usize, z: usize, rho: f64, u: [f64; 3]) {
        let c = self.cell(x, y, z);
        for i in 0..Q {
            self.f[c + i] = descriptor::equilibrium(i, rho, u);
        }
    }

    /// One full update: collide every cell, then stream along all
    /// directions with periodic wrap-around.
    pub fn collide_and_stream(&mut self) {
        self.collide();
        self.stream();
    }

    fn collide(&mut self) {
        let dynamics = &self.dynamics;
        self.f_post
            .par_chunks_mut(Q)
            .zip(self.f.par_chunks(Q))
            .with_min_len(MIN_CELLS_PER_TASK)
            .for_each(|(post, pre)| {
                post.copy_from_slice(pre);
                dynamics.collide(post);
            });
    }

    /// Pull scheme: each destination cell gathers the post-collision value
    /// from its upwind neighbor, so destinations are written disjointly.
    fn stream(&mut self) {
        let (nxu, nyu) = (self.nx, self.ny);
        let (nx, ny, nz) = (self.nx as i64, self.ny as i64, self.nz as i64);
        let f_post = &self.f_post;
        self.f
            .par_chunks_mut(Q)
            .enumerate()
            .with_min_len(MIN_CELLS_PER_TASK)
            .for_each(|(ci, cell)| {
                let x = (ci % nxu) as i64;
                let y = ((ci / nxu) % nyu) as i64;
                let z = (ci / (nxu * nyu)) as i64;
                for (i, e) in VELOCITIES.iter().enumerate() {
                    let sx = (x - e[0] as i64).rem_euclid(nx) as usize;
                    let sy = (y - e[1] as i64).rem_euclid(ny) as usize;
                    let sz = (z - e[2] as i64).rem_euclid(nz) as usize;
                    cell[i] = f_post[(sx + nxu * (sy + nyu * sz)) * Q + i];
                }
            });
    }

    /// Macroscopic density at one cell.
    pub fn density(&self, x: usize, y: usize, z: usize) -> f64 {
        let c = self.cell(x, y, z);
        self.f[c..c + Q].iter().sum()
    }

    /// Macroscopic velocity at one cell.
    pub fn velocity(&self, x: usize, y: usize, z: usize) -> [f64; 3] {
        let c = self.cell(x, y, z);
        let (_, u) = descriptor::moments(&self.f[c..c + Q]);
        u
    }

    /// Sum of all distribution values; conserved by collide_and_stream on a
    /// periodic lattice.
    pub fn total_mass(&self) -> f64 {
        self.f.par_iter().sum()
    }
}
