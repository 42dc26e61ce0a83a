use super::LookupTool;
use crate::config::LookupConfig;
use crate::error::FilterError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Runs the external lookup program once per batch:
/// `<program> [args...] <subcommand> <ref>...`
pub struct CommandLookup {
    program: String,
    args: Vec<String>,
    subcommand: String,
}

impl CommandLookup {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            subcommand: config.subcommand.clone(),
        }
    }

    fn argv<'a>(&'a self, batch: &'a [String]) -> impl Iterator<Item = &'a str> {
        self.args
            .iter()
            .chain(std::iter::once(&self.subcommand))
            .chain(batch.iter())
            .map(String::as_str)
    }

    /// The full command line for `batch`, space-joined.
    pub fn command_line(&self, batch: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.argv(batch))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl LookupTool for CommandLookup {
    async fn lookup(&mut self, batch: &[String]) -> Result<String, FilterError> {
        let output = Command::new(&self.program)
            .args(self.argv(batch))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| FilterError::Spawn {
                command: self.command_line(batch),
                source,
            })?;

        if !output.status.success() {
            return Err(FilterError::Invocation {
                command: self.command_line(batch),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                code: output.status.code(),
            });
        }

        if !output.stderr.is_empty() {
            tracing::debug!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "lookup tool wrote to stderr"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn describe(&self, batch: &[String]) -> String {
        self.command_line(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandLookup {
        // `sh -c <script> <subcommand> <refs...>` puts the subcommand in $0
        // and the references in $@.
        CommandLookup::new(&LookupConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            subcommand: "getref".to_string(),
            batch_size: 100,
        })
    }

    fn batch(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_line() {
        let lookup = CommandLookup::new(&LookupConfig::default());
        assert_eq!(lookup.command_line(&batch(&["A", "B"])), "bem getref A B");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_each_reference_is_a_separate_argument() {
        let mut lookup = sh(r#"printf '%s|' "$0" "$#" "$@""#);
        let out = lookup.lookup(&batch(&["A 1", "B"])).await.unwrap();
        assert_eq!(out, "getref|2|A 1|B|");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_invocation_error() {
        let mut lookup = sh("echo 'token expired' >&2; exit 4");
        let err = lookup.lookup(&batch(&["A"])).await.unwrap_err();
        match &err {
            FilterError::Invocation { stderr, code, .. } => {
                assert_eq!(stderr.trim(), "token expired");
                assert_eq!(*code, Some(4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let mut lookup = CommandLookup::new(&LookupConfig {
            program: "/nonexistent/bem".to_string(),
            ..LookupConfig::default()
        });
        let err = lookup.lookup(&batch(&["A"])).await.unwrap_err();
        assert!(matches!(err, FilterError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
