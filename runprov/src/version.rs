//! Software version detection.
//!
//! The recorder never fails because a version is unknown. Strategies are
//! tried in order and the first non-empty answer wins; when none answers,
//! the software entity is recorded without a version.

use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Default upper bound for running `<program> --version`.
pub const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A way of finding out which version of a program is being recorded.
#[cfg_attr(test, mockall::automock)]
pub trait VersionStrategy {
    /// Return the version of `program`, or `None` if this strategy cannot
    /// tell.
    fn detect(&self, program: &str) -> Option<String>;
}

/// A version supplied up front.
#[derive(Debug, Clone)]
pub struct FixedVersion(pub String);

impl VersionStrategy for FixedVersion {
    fn detect(&self, _program: &str) -> Option<String> {
        Some(self.0.clone()).filter(|v| !v.is_empty())
    }
}

/// Runs `<program> --version` and takes the last whitespace-separated token
/// of its standard output.
///
/// The program is used directly if it names an executable file, otherwise
/// it is looked up on `PATH`.
#[derive(Debug, Clone)]
pub struct ExecutableVersion {
    timeout: Duration,
}

impl Default for ExecutableVersion {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_TIMEOUT)
    }
}

impl ExecutableVersion {
    /// Create a strategy that gives up after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn run(&self, executable: &Path) -> Option<String> {
        let mut child = Command::new(executable)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        let mut stdout = child.stdout.take()?;
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut output = String::new();
            let read = stdout.read_to_string(&mut output).map(|_| output);
            let _ = sender.send(read);
        });

        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if start.elapsed() < self.timeout => thread::sleep(POLL_INTERVAL),
                Ok(None) => {
                    log::debug!(
                        "{} --version did not finish within {:?}",
                        executable.display(),
                        self.timeout
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Err(e) => {
                    log::debug!("Failed waiting for {}: {e}", executable.display());
                    return None;
                }
            }
        }

        // A background process started by the program may still hold stdout.
        let remaining = self.timeout.saturating_sub(start.elapsed()).max(POLL_INTERVAL);
        match receiver.recv_timeout(remaining) {
            Ok(Ok(output)) => parse_version_output(&output),
            Ok(Err(e)) => {
                log::debug!("Failed reading {} output: {e}", executable.display());
                None
            }
            Err(_) => {
                log::debug!(
                    "{} --version output still open after {:?}",
                    executable.display(),
                    self.timeout
                );
                None
            }
        }
    }
}

impl VersionStrategy for ExecutableVersion {
    fn detect(&self, program: &str) -> Option<String> {
        let executable = find_executable(program)?;
        self.run(&executable)
    }
}

/// Extract a version from `--version` output: the last whitespace-separated
/// token, so `myscript 1.2.3` yields `1.2.3`.
///
/// # Examples
///
/// ```
/// use runprov::version::parse_version_output;
///
/// assert_eq!(parse_version_output("myscript 1.2.3\n"), Some("1.2.3".to_string()));
/// assert_eq!(parse_version_output("   "), None);
/// ```
#[must_use]
pub fn parse_version_output(output: &str) -> Option<String> {
    output.split_whitespace().last().map(str::to_string)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Locate `program` either as a path to an executable or on `PATH`.
#[must_use]
pub fn find_executable(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let direct = Path::new(program);
    if is_executable(direct) {
        return Some(direct.to_path_buf());
    }
    if direct.components().count() > 1 {
        return None;
    }
    let search = env::var_os("PATH")?;
    env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

/// The strategy chain used when no version is supplied.
#[must_use]
pub fn default_strategies(timeout: Duration) -> Vec<Box<dyn VersionStrategy>> {
    vec![Box::new(ExecutableVersion::new(timeout))]
}

/// Ask each strategy in turn; an empty string means unknown.
pub fn detect_software_version(program: &str, strategies: &[Box<dyn VersionStrategy>]) -> String {
    for strategy in strategies {
        if let Some(version) = strategy.detect(program).filter(|v| !v.is_empty()) {
            log::debug!("Detected version {version} for {program}");
            return version;
        }
    }
    log::debug!("No version found for {program}");
    String::new()
}
