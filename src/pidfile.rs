// Wi-Fi Roaming - PID File
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! PID file written while the daemon runs and removed when it stops.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::{Error, Result};

/// Guard that owns the PID file; the file is removed on drop.
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Write the current process ID to `path`.
    ///
    /// Fails if the file names another process that is still alive. A
    /// stale file left by a dead process is replaced.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(pid) = read_pid(path) {
            if pid != std::process::id() && process_alive(pid) {
                return Err(Error::PidFile(format!(
                    "{} belongs to running process {}",
                    path.display(),
                    pid
                )));
            }
            debug!("Replacing stale PID file {}", path.display());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{}\n", std::process::id()))
            .map_err(|e| Error::PidFile(format!("{}: {}", path.display(), e)))?;

        debug!("Wrote PID file {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove PID file {}: {}", self.path.display(), e);
        }
    }
}

fn read_pid(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    false
}
