//! Excel系ワークブックの読み込み（calamine）

use crate::error::{CircuitMatchError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use circuit_match_common::{Cell, Table};
use std::path::Path;

/// シートを読み込む
///
/// - `sheet`: `None` なら先頭シート
/// - `header_row`: ヘッダー行（シート上の0始まり行番号）。`None` ならヘッダーなし
pub fn read_sheet(path: &Path, sheet: Option<&str>, header_row: Option<u32>) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CircuitMatchError::Workbook(format!("{}: {}", path.display(), e)))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => {
            return Err(CircuitMatchError::SheetNotFound(format!(
                "{} ({}; シート: {})",
                name,
                path.display(),
                sheet_names.join(", ")
            )))
        }
        None => sheet_names.first().cloned().ok_or_else(|| {
            CircuitMatchError::Workbook(format!("シートがありません: {}", path.display()))
        })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CircuitMatchError::Workbook(format!("シート '{}' の読み込みに失敗: {}", sheet_name, e)))?;

    Ok(range_to_table(&range, header_row))
}

/// calamineのRangeを表に変換
///
/// Rangeは最初の使用セルから始まるため、行番号は開始位置を足して絶対行で扱う。
/// ヘッダー行が先頭の空行に含まれる場合は、最初の使用行をヘッダーとする。
pub fn range_to_table(range: &Range<Data>, header_row: Option<u32>) -> Table {
    let start_row = range.start().map_or(0, |(row, _)| row);
    let header_row = header_row.map(|h| h.max(start_row));

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for (i, row) in range.rows().enumerate() {
        let sheet_row = start_row + i as u32;
        match header_row {
            Some(h) if sheet_row < h => continue,
            Some(h) if sheet_row == h => {
                header = Some(row.iter().map(|d| to_cell(d).as_text().into_owned()).collect());
            }
            _ => rows.push(row.iter().map(to_cell).collect()),
        }
    }

    match (header_row, header) {
        (Some(_), Some(columns)) => Table::new(columns, rows),
        (Some(_), None) => Table::new(Vec::new(), rows),
        (None, _) => Table::without_header(rows),
    }
}

/// セル値の変換（日時・エラー値はテキスト表現）
pub fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Int(*i),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}
