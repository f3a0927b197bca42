use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::CommandError;

/// Runs external commands (git, go, gauge). Behind a trait so the
/// installer can be exercised without spawning real processes.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<(), CommandError>;
}

pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<(), CommandError> {
        debug!("running {program} {}", args.join(" "));
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        let status = command.status().map_err(|e| CommandError::Spawn {
            program: program.to_string(),
            source: e,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                program: program.to_string(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_program_as_spawn_failure() {
        let err = ProcessRunner
            .run("definitely-not-a-real-program-7f3a", &[], None)
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn reports_nonzero_exit() {
        let err = ProcessRunner.run("false", &[], None).unwrap_err();
        match err {
            CommandError::Failed { program, .. } => assert_eq!(program, "false"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn success_is_ok() {
        ProcessRunner.run("true", &[], None).unwrap();
    }
}
