pub mod excel;

use crate::error::Result;
use chrono::{DateTime, TimeZone};
use circuit_match_common::CompareOutcome;
use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）ならファイル名を補う
pub fn resolve_output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// サマリーExcelの既定ファイル名（summary_export_job{ジョブID}_{ddmmyy_HHMM}.xlsx）
pub fn summary_file_name<Tz>(job_id: u64, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("summary_export_job{}_{}.xlsx", job_id, at.format("%d%m%y_%H%M"))
}

/// 照合結果をJSONで保存
pub fn write_report(outcome: &CompareOutcome, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(outcome)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 保存済みの照合結果を読み込み
pub fn read_report(path: &Path) -> Result<CompareOutcome> {
    let content = std::fs::read_to_string(path)?;
    let outcome: CompareOutcome = serde_json::from_str(&content)?;
    Ok(outcome)
}
