//! Process boundary: replace the current process image, or spawn and wait

use std::io;
use std::process::Command;

use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("empty command vector")]
    Empty,

    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// The two process primitives the runner needs. Tests substitute a recording
/// double; production uses [`SystemExecutor`].
pub trait Executor {
    /// Replace the current process image with `argv`. On Unix this only
    /// returns on failure; on other platforms it degrades to spawn-and-wait
    /// and returns the child's exit status.
    ///
    /// # Errors
    ///
    /// Returns `ExecError::Spawn` if the program cannot be started, or
    /// `ExecError::Empty` for an empty vector.
    fn replace(&mut self, argv: &[String]) -> Result<i32, ExecError>;

    /// Spawn `argv` as a child process, block until it exits, and return its
    /// exit status explicitly.
    ///
    /// # Errors
    ///
    /// Returns `ExecError::Spawn` if the program cannot be started, or
    /// `ExecError::Empty` for an empty vector.
    fn run(&mut self, argv: &[String]) -> Result<i32, ExecError>;
}

/// Real implementation on top of `std::process`. Stdio, signals, and the
/// environment are inherited untouched.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn replace(&mut self, argv: &[String]) -> Result<i32, ExecError> {
        let (program, rest) = split(argv)?;
        debug!("replacing process with `{}`", argv.join(" "));

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            let source = Command::new(program).args(rest).exec();
            Err(ExecError::Spawn {
                program: program.clone(),
                source,
            })
        }

        #[cfg(not(unix))]
        {
            let _ = (program, rest);
            self.run(argv)
        }
    }

    fn run(&mut self, argv: &[String]) -> Result<i32, ExecError> {
        let (program, rest) = split(argv)?;
        debug!("running `{}`", argv.join(" "));
        let status = Command::new(program)
            .args(rest)
            .status()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;
        if status.success() {
            Ok(0)
        } else {
            // Terminated-by-signal has no code on Unix; report generic failure
            Ok(status.code().unwrap_or(1))
        }
    }
}

fn split(argv: &[String]) -> Result<(&String, &[String]), ExecError> {
    argv.split_first().ok_or(ExecError::Empty)
}
