use std::io;

/// Every way a run can fail. All of them are fatal to the whole run.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("{0}")]
    Usage(String),

    #[error("File not found: {0}")]
    InputNotFound(String),

    #[error("No references found in {0}")]
    NoReferences(String),

    #[error("failed to read {path}: {source}")]
    InputRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),

    #[error("Failed to start command: {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Command failed: {command}\n{stderr}")]
    Invocation {
        command: String,
        stderr: String,
        code: Option<i32>,
    },

    #[error("Failed to parse JSON from lookup tool: {source}\n{raw}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("Unexpected response (expected array): {raw}")]
    UnexpectedResponse { raw: String },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl FilterError {
    /// Process exit status for this failure. A failed lookup exits with the
    /// tool's own code when it has one.
    pub fn exit_code(&self) -> i32 {
        match self {
            FilterError::Invocation { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
