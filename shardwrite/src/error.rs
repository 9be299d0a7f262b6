use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("rewrite: {0}")]
    Rewrite(#[from] crate::rewrite::Error),

    #[error("encrypt: {0}")]
    Encrypt(#[from] crate::encrypt::Error),

    #[error("config: {0}")]
    Config(#[from] shardwrite_config::Error),
}
