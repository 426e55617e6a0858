//! 表ファイルの読み込み
//!
//! Excel/CSVを照合コアの `Table` に変換する。照合コアからは呼ばれない。

pub mod delimited;
pub mod workbook;

use crate::error::{CircuitMatchError, Result};
use circuit_match_common::Table;
use std::path::Path;

/// マスタとして受け付ける拡張子
pub const MASTER_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];

/// 比較表として受け付けるワークブックの拡張子
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CircuitMatchError::FileNotFound(path.display().to_string()))
    }
}

/// マスタExcelを読み込む
///
/// `header_row` はシート上の行番号（0始まり）。それより上の行は読み飛ばす。
pub fn read_master(path: &Path, sheet_name: &str, header_row: u32) -> Result<Table> {
    ensure_exists(path)?;

    let ext = extension_of(path);
    if !MASTER_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CircuitMatchError::UnsupportedFormat(format!(
            "マスタは .xlsx である必要があります: {}",
            path.display()
        )));
    }

    let table = workbook::read_sheet(path, Some(sheet_name), Some(header_row))?;
    tracing::debug!(path = %path.display(), sheet = sheet_name, rows = table.len(), "マスタ読み込み");
    Ok(table)
}

/// 比較表を読み込む（Excelは先頭シート、CSVはUTF-8またはWindows-874）
pub fn read_comparison(path: &Path, has_header: bool) -> Result<Table> {
    ensure_exists(path)?;

    let ext = extension_of(path);
    let table = if ext == "csv" {
        delimited::read_csv(path, has_header)?
    } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        workbook::read_sheet(path, None, has_header.then_some(0))?
    } else {
        return Err(CircuitMatchError::UnsupportedFormat(path.display().to_string()));
    };

    tracing::debug!(path = %path.display(), rows = table.len(), columns = table.columns().len(), "比較表読み込み");
    Ok(table)
}
