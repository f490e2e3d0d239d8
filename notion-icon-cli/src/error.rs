use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no token_v2 cookie for notion.so in {}", path.display())]
    NoSessionCookie { path: PathBuf },

    #[error("missing credential '{0}' (set a flag, an environment variable or the config file)")]
    MissingCredential(&'static str),
}
