use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircuitMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です: {0}")]
    UnsupportedFormat(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(String),

    #[error("CSV読み込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("照合エラー: {0}")]
    Compare(#[from] circuit_match_common::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),
}

impl From<rust_xlsxwriter::XlsxError> for CircuitMatchError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        CircuitMatchError::ExcelGeneration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CircuitMatchError>;
