//! エラー型定義

use thiserror::Error;

/// 照合コアのエラー型
#[derive(Error, Debug)]
pub enum Error {
    /// マスタにキー列が存在しない（構成エラー、照合は中断）
    #[error("Configuration error: key column '{column}' not found in master table (columns: {available})")]
    MissingKeyColumn { column: String, available: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_key_column(column: &str, columns: &[String]) -> Self {
        Error::MissingKeyColumn {
            column: column.to_string(),
            available: columns.join(", "),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
