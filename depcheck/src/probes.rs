//! One probe per dependency the checker vouches for. A probe makes a
//! trivial real call into the dependency and verifies the result, so a
//! printed confirmation means the library was linked and is callable.

use rayon::prelude::*;

use lbm::{BgkDynamics, Lattice3D};

pub type Probe = fn() -> Result<String, String>;

/// Probes in the order their confirmation lines must appear.
pub const ALL: [(&str, Probe); 4] = [
    ("lattice-boltzmann solver", lattice_solver),
    ("rayon parallel runtime", rayon_runtime),
    ("system diagnostics", system_diagnostics),
    ("rust toolchain", rust_toolchain),
];

/// Build a tiny lattice and push it through one full update step.
fn lattice_solver() -> Result<String, String> {
    let mut lattice = Lattice3D::new(4, 4, 4, BgkDynamics::new(1.0));
    lattice.initialize();
    lattice.collide_and_stream();
    let mass = lattice.total_mass();
    if mass.is_finite() && mass > 0.0 {
        Ok(format!("4x4x4 lattice stepped, total mass {mass:.6}"))
    } else {
        Err(format!("degenerate total mass {mass}"))
    }
}

fn rayon_runtime() -> Result<String, String> {
    let sum: u64 = (0..1024u64).into_par_iter().map(|i| i * 2).sum();
    if sum == 1023 * 1024 {
        Ok(format!("{} worker threads", rayon::current_num_threads()))
    } else {
        Err(format!("parallel sum returned {sum}, expected {}", 1023 * 1024))
    }
}

fn system_diagnostics() -> Result<String, String> {
    let system = run_record::system_summary();
    let cpus = system
        .get("cpu_cores")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    if cpus > 0 {
        let host = system
            .get("hostname")
            .cloned()
            .unwrap_or_else(|| "<unknown>".to_string());
        Ok(format!("{cpus} cpus on {host}"))
    } else {
        Err("no cpus reported".to_string())
    }
}

fn rust_toolchain() -> Result<String, String> {
    let version = run_record::rustc_version();
    if version.starts_with("rustc") {
        Ok(format!("{version}, commit {}", run_record::git_commit()))
    } else {
        Err("rustc version not recorded at build time".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_probe_passes_on_a_working_build() {
        for (label, probe) in ALL {
            assert!(probe().is_ok(), "probe `{label}` failed");
        }
    }

    #[test]
    fn probe_labels_are_unique() {
        for (i, (label, _)) in ALL.iter().enumerate() {
            for (other, _) in ALL.iter().skip(i + 1) {
                assert_ne!(label, other);
            }
        }
    }
}
