use std::path::PathBuf;

use brewmart_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to read locale file {path}: {source}")]
    LocaleIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid locale resources for {locale}: {source}")]
    LocaleParse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("locale resources for {locale} must be a JSON object")]
    LocaleShape { locale: String },
}
