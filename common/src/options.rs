//! 照合オプション（マスタの列構成）

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// サービス種別として参照する列名（優先順）
pub const DEFAULT_SERVICE_TYPE_COLUMNS: [&str; 5] =
    ["ประเภท", "บริการ", "Service", "Service Type", "ประเภทบริการ"];

/// マスタ表の列構成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// 回線コード列
    pub key_column: String,
    /// 顧客列
    pub customer_column: String,
    /// プロジェクト名列
    pub project_column: String,
    /// 県列
    pub province_column: String,
    /// サービス種別の候補列（先に見つかった値を採用）
    pub service_type_columns: Vec<String>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            key_column: "เลขวงจร".into(),
            customer_column: "ลูกค้า".into(),
            project_column: "ชื่อโครงการ".into(),
            province_column: "จังหวัด".into(),
            service_type_columns: DEFAULT_SERVICE_TYPE_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl MatchOptions {
    /// キー列だけ差し替えたオプション
    pub fn with_key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = key_column.into();
        self
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み（省略した項目はデフォルト）
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options)
    }
}
