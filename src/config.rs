use crate::error::{CircuitMatchError, Result};
use circuit_match_common::options::DEFAULT_SERVICE_TYPE_COLUMNS;
use circuit_match_common::MatchOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 既定のマスタExcel
    pub master_path: Option<PathBuf>,
    pub sheet_name: String,
    /// マスタのヘッダー行（0始まり）
    pub header_row: u32,
    pub key_column: String,
    pub customer_column: String,
    pub project_column: String,
    pub province_column: String,
    pub service_type_columns: Vec<String>,
    pub sla_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書きする
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// 指定パスの設定を読み込む（ファイルがなければ既定値）
    ///
    /// 空文字列の列名・シート名は既定値に戻す。
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "設定ファイルなし、既定値を使用");
            return Ok(Self::default_config());
        }

        let mut config: Config = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let defaults = Self::default_config();
        for (value, default) in [
            (&mut config.sheet_name, defaults.sheet_name),
            (&mut config.key_column, defaults.key_column),
            (&mut config.customer_column, defaults.customer_column),
            (&mut config.project_column, defaults.project_column),
            (&mut config.province_column, defaults.province_column),
            (&mut config.sla_column, defaults.sla_column),
        ] {
            if value.trim().is_empty() {
                *value = default;
            }
        }
        if config.service_type_columns.is_empty() {
            config.service_type_columns = defaults.service_type_columns;
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `~/.config/circuit-match/config.json`
    pub fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config").join("circuit-match").join("config.json"))
            .ok_or_else(|| CircuitMatchError::Config("ホームディレクトリが見つかりません".into()))
    }

    fn default_config() -> Self {
        let options = MatchOptions::default();
        Self {
            master_path: None,
            sheet_name: "Sheet1".into(),
            header_row: 1, // 1行目はタイトル行
            key_column: options.key_column,
            customer_column: options.customer_column,
            project_column: options.project_column,
            province_column: options.province_column,
            service_type_columns: DEFAULT_SERVICE_TYPE_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sla_column: "SLA".into(),
        }
    }

    /// 環境変数を優先（MASTER_EXCEL_PATH / SHEET_NAME / KEY_COLUMN）
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty("MASTER_EXCEL_PATH") {
            self.master_path = Some(PathBuf::from(path));
        }
        if let Some(sheet) = non_empty("SHEET_NAME") {
            self.sheet_name = sheet;
        }
        if let Some(key) = non_empty("KEY_COLUMN") {
            self.key_column = key;
        }
        self
    }

    /// マスタのパス（未設定ならエラー）
    pub fn master_path(&self) -> Result<PathBuf> {
        self.master_path.clone().ok_or_else(|| {
            CircuitMatchError::Config(
                "マスタファイルが設定されていません。`circuit-match config --set-master PATH` か MASTER_EXCEL_PATH で設定してください".into(),
            )
        })
    }

    pub fn set_master_path(&mut self, path: PathBuf) -> Result<()> {
        self.master_path = Some(path);
        self.save()
    }

    pub fn set_key_column(&mut self, key_column: String) -> Result<()> {
        self.key_column = key_column;
        self.save()
    }

    /// 照合コアに渡すオプション
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            key_column: self.key_column.clone(),
            customer_column: self.customer_column.clone(),
            project_column: self.project_column.clone(),
            province_column: self.province_column.clone(),
            service_type_columns: self.service_type_columns.clone(),
        }
    }
}
