//! D3Q19 lattice-Boltzmann solver.
//!
//! A 3D cubic lattice with nineteen discrete velocities per cell (1 rest,
//! 6 face-centered, 12 edge-centered), BGK collision, and pull-scheme
//! streaming over periodic boundaries. Collision and streaming are both
//! data-parallel over cells through rayon.

mod descriptor;
mod dynamics;
mod lattice;

pub use descriptor::{OPPOSITE, Q, VELOCITIES, WEIGHTS};
pub use dynamics::{BgkDynamics, Dynamics};
pub use lattice::Lattice3D;
