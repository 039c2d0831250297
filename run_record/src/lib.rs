//! Diagnostic run records for the smoke-test binaries.
//!
//! Each binary appends one JSON line per run describing what ran, where it
//! ran, and what came out. Records are best-effort: a smoke test never fails
//! because its record could not be written.

mod timing;

pub use timing::Stopwatch;

use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Dependencies whose resolved versions are pulled out of Cargo.lock.
const CHECK_PACKAGES: [&str; 5] = ["rayon", "clap", "serde_json", "sysinfo", "tracing"];

/// Environment prefixes captured into the record.
const ENV_PREFIXES: [&str; 2] = ["RAYON", "RUST_LOG"];

#[derive(Serialize)]
pub struct RunRecord {
    pub name: String,
    executable: PathBuf,
    parameters: Vec<String>,
    run_date: String,
    build_type: String,
    git_commit: String,
    rust_compiler: String,
    rust_edition: String,
    dependencies: BTreeMap<String, String>,
    system: BTreeMap<String, String>,
    environment: BTreeMap<String, String>,
    output: BTreeMap<String, String>,
}

impl RunRecord {
    /// Create a record named after the running executable.
    pub fn new() -> Self {
        Self::with_name(&default_record_name())
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            executable: executable(),
            parameters: env::args().skip(1).collect(),
            run_date: run_date(),
            build_type: build_type(),
            git_commit: git_commit().to_string(),
            rust_compiler: rustc_version().to_string(),
            rust_edition: rust_edition(),
            dependencies: package_info(),
            system: system_summary(),
            environment: captured_environment(),
            output: BTreeMap::new(),
        }
    }

    /// Add a key/value pair to the output section of the record.
    pub fn with_output(&mut self, key: &str, value: String) {
        self.output.insert(key.to_string(), value);
    }

    pub fn as_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Print the record to stdout, pretty-printed or as a single line.
    pub fn display(&self, pretty: bool) {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        if let Ok(rendered) = rendered {
            println!("{rendered}");
        }
    }

    /// Append the record as one JSON line, creating parent directories as
    /// needed. The file is treated as JSON-lines and never truncated.
    pub fn write(&self, path: &Path) {
        let line = match serde_json::to_string(self) {
            Ok(line) => line,
            Err(_) => return,
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(mut f) => {
                if let Err(err) = writeln!(f, "{line}") {
                    tracing::warn!(%err, path = %path.display(), "failed to append run record");
                }
            }
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "failed to open run record file");
            }
        }
    }
}

impl Default for RunRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Short git commit hash of the tree this library was compiled from.
pub fn git_commit() -> &'static str {
    env!("GIT_COMMIT_HASH")
}

/// `rustc --version` of the compiler that built this library.
pub fn rustc_version() -> &'static str {
    env!("RUSTC_VERSION")
}

/// Record name derived from the executable file name.
pub fn default_record_name() -> String {
    executable()
        .file_stem()
        .unwrap_or(OsStr::new("__unknown__"))
        .to_string_lossy()
        .to_string()
}

/// Selected host facts gathered through sysinfo.
pub fn system_summary() -> BTreeMap<String, String> {
    let mut system = BTreeMap::new();
    let sys = sysinfo::System::new_all();

    if let Some(os_name) = sysinfo::System::name() {
        system.insert("os_name".to_string(), os_name);
    }
    if let Some(kernel_version) = sysinfo::System::kernel_version() {
        system.insert("kernel_version".to_string(), kernel_version);
    }
    if let Some(os_version) = sysinfo::System::long_os_version() {
        system.insert("os_version".to_string(), os_version);
    }
    if let Some(hostname) = sysinfo::System::host_name() {
        system.insert("hostname".to_string(), hostname);
    }

    system.insert("cpu_cores".to_string(), sys.cpus().len().to_string());
    if let Some(cpu) = sys.cpus().first() {
        system.insert("cpu_frequency_mhz".to_string(), cpu.frequency().to_string());
        system.insert("cpu_vendor_id".to_string(), cpu.vendor_id().to_string());
        system.insert("cpu_brand".to_string(), cpu.brand().to_string());
    }
    system.insert("ram_bytes".to_string(), sys.total_memory().to_string());
    system.insert("swap_bytes".to_string(), sys.total_swap().to_string());

    system
}

fn executable() -> PathBuf {
    env::current_exe().unwrap_or_else(|_| PathBuf::from("__unknown__"))
}

fn run_date() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// In a standard cargo layout the executable's parent dir names the build
/// type. Anything else reports as unknown.
fn build_type() -> String {
    let exe = executable();
    let parent = match exe.parent() {
        Some(parent) => parent,
        None => return "<unknown>".to_string(),
    };
    let build_type = parent
        .file_name()
        .unwrap_or(OsStr::new("<unknown>"))
        .to_string_lossy()
        .to_string();
    if ["debug", "release"].contains(&build_type.as_str()) {
        build_type
    } else {
        "<unknown>".to_string()
    }
}

fn captured_environment() -> BTreeMap<String, String> {
    env::vars()
        .filter(|(key, _)| ENV_PREFIXES.iter().any(|prefix| key.starts_with(prefix)))
        .collect()
}

/// Read the crate edition out of the manifest, when running under cargo.
fn rust_edition() -> String {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let manifest = PathBuf::from(manifest_dir).join("Cargo.toml");
    if let Ok(contents) = fs::read_to_string(manifest) {
        for line in contents.lines() {
            let line = line.trim_start();
            if let Some(rest) = line.strip_prefix("edition") {
                if let Some(value) = rest.trim_start().strip_prefix('=') {
                    return value.trim().trim_matches('"').to_string();
                }
            }
        }
    }
    "<unknown>".to_string()
}

/// Walk up from the manifest dir to find Cargo.lock (it lives at the
/// workspace root, not next to member manifests) and scrape the resolved
/// versions of the packages in CHECK_PACKAGES.
fn package_info() -> BTreeMap<String, String> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let mut dir = Some(manifest_dir.as_path());
    while let Some(d) = dir {
        let lock = d.join("Cargo.lock");
        if lock.is_file() {
            return parse_lock(&lock);
        }
        dir = d.parent();
    }
    BTreeMap::new()
}

fn parse_lock(path: &Path) -> BTreeMap<String, String> {
    let mut info = BTreeMap::new();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return info,
    };
    let mut lines = contents.lines();
    while let Some(line) = lines.next() {
        let name = match line.trim_start().strip_prefix("name = ") {
            Some(name) => name.trim().trim_matches('"'),
            None => continue,
        };
        if !CHECK_PACKAGES.contains(&name) {
            continue;
        }
        if let Some(version_line) = lines.next() {
            if let Some(version) = version_line.trim_start().strip_prefix("version = ") {
                info.insert(
                    name.to_string(),
                    version.trim().trim_matches('"').to_string(),
                );
            }
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_name_matches_test_executable() {
        let name = default_record_name();
        assert!(name.contains("run_record"), "unexpected name: {name}");
    }

    #[test]
    fn output_map_round_trips_through_json() {
        let mut record = RunRecord::with_name("unit");
        record.with_output("sum", "200000".to_string());
        let json = record.as_json();
        assert_eq!(json["name"], "unit");
        assert_eq!(json["output"]["sum"], "200000");
    }

    #[test]
    fn captured_environment_picks_up_rayon_prefix() {
        env::set_var("RAYON_RECORD_TEST_VAR", "1");
        let environment = captured_environment();
        assert_eq!(
            environment.get("RAYON_RECORD_TEST_VAR").map(String::as_str),
            Some("1")
        );
    }

    #[test]
    fn write_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records").join("smoke.jsonl");

        let record = RunRecord::with_name("unit");
        record.write(&path);
        record.write(&path);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(parsed["name"], "unit");
        }
    }

    #[test]
    fn system_summary_reports_at_least_one_cpu() {
        let system = system_summary();
        let cpus: usize = system.get("cpu_cores").unwrap().parse().unwrap();
        assert!(cpus >= 1);
    }

    #[test]
    fn rustc_version_is_captured_at_build_time() {
        assert!(rustc_version().starts_with("rustc"));
    }
}
