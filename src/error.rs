use std::path::PathBuf;

/// Fatal pipeline failures. Any of these aborts the running stage; the
/// invoking scheduler's retry-by-re-invocation is the only recovery path.
///
/// Per-field and per-row conversion problems are deliberately not part of
/// this taxonomy: they degrade to null values and a `warn!` log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration is missing. Retrying cannot help.
    #[error("{0}")]
    Config(String),

    /// The video platform API failed in a way that invalidates the run.
    #[error("{context}")]
    Api {
        context: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The run produced no usable records.
    #[error("{0}")]
    EmptyResult(String),

    /// An expected input file is absent, i.e. the upstream stage did not
    /// run or was pointed somewhere else.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input exists but cannot be parsed as tabular data.
    #[error("cannot parse {} as CSV", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
