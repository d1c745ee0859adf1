//! Exclusive lock over a store directory for one load → mutate → save cycle.
//!
//! The lock file `<dir>/.lock` is created once and never removed: deleting
//! it while another process waits on the old inode would let two holders
//! in at the same time.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long a mutating command waits for another `tl` to finish
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Error type for taking the store lock
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("store {dir} is busy: another tl process held it for over {waited:?}")]
    Busy { dir: PathBuf, waited: Duration },
}

/// Held for the duration of a command that rewrites the store. Released
/// when dropped (the flock goes with the file handle).
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
}

impl StoreLock {
    /// Lock `dir`, creating it if needed, waiting up to `timeout`.
    pub fn acquire(dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = dir.join(".lock");
        let open_err = |source| LockError::Open {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(dir).map_err(open_err)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_err)?;

        let start = Instant::now();
        while !try_flock(&file) {
            if start.elapsed() >= timeout {
                log::warn!("gave up waiting for {}", path.display());
                return Err(LockError::Busy {
                    dir: dir.to_path_buf(),
                    waited: timeout,
                });
            }
            std::thread::sleep(RETRY_INTERVAL);
        }
        log::trace!("locked {} after {:?}", path.display(), start.elapsed());
        Ok(StoreLock { _file: file })
    }
}

#[cfg(unix)]
fn try_flock(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;
    unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) == 0 }
}

#[cfg(not(unix))]
fn try_flock(_file: &File) -> bool {
    true
}
