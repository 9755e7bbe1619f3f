use crate::config::Service;
use crate::mt::MtError;
use crate::tree::TreeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before or after the tree walk
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Mt(#[from] MtError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("cannot extend {}: the file does not exist yet", .0.display())]
    MissingExtendTarget(PathBuf),

    #[error("{} already exists, pass --override to replace it or --extend to add the missing keys", .0.display())]
    OutputExists(PathBuf),

    #[error("{} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("you must select a json file or a folder containing json files, got {}", .0.display())]
    NotJson(PathBuf),

    #[error("no json files found in {}", .0.display())]
    NoInputFiles(PathBuf),

    #[error("several json files found in {}, pick one of: {}", .dir.display(), .files.join(", "))]
    AmbiguousInput { dir: PathBuf, files: Vec<String> },

    #[error("you are trying to translate to the same language ({0})")]
    SameLanguage(String),

    #[error("language {code} is not supported by {service}")]
    UnsupportedLanguage { code: String, service: Service },

    #[error("{0} requires a source locale, pass --source-locale")]
    SourceLocaleRequired(Service),

    #[error("a glossary can only be used together with a source locale")]
    GlossaryWithoutSource,

    #[error("invalid delay between API calls: {0}")]
    InvalidDelay(f64),

    #[error("unknown encoding \"{0}\"")]
    UnknownEncoding(String),

    #[error("{} is not valid {encoding}", .path.display())]
    Undecodable { path: PathBuf, encoding: &'static str },

    #[error("the translation cannot be represented in {encoding}")]
    Unencodable { encoding: &'static str },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize the translation: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
