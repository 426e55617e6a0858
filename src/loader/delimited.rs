//! CSV読み込み

use crate::error::Result;
use circuit_match_common::{Cell, Table};
use std::path::Path;

/// CSVファイルを読み込む
pub fn read_csv(path: &Path, has_header: bool) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    parse_csv(&decode(&bytes), has_header)
}

/// バイト列を文字列に変換
///
/// UTF-8として読めなければWindows-874（タイ語版Excelの既定）として解釈する。BOMは除去。
pub fn decode(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_874.decode(bytes);
            decoded.into_owned()
        }
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// CSV文字列を表に変換（空フィールドは欠損扱い）
pub fn parse_csv(content: &str, has_header: bool) -> Result<Table> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records: Vec<Vec<Cell>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    if !has_header {
        return Ok(Table::without_header(records));
    }

    let mut records = records.into_iter();
    let columns = records
        .next()
        .map(|header| header.iter().map(|c| c.as_text().into_owned()).collect())
        .unwrap_or_default();
    Ok(Table::new(columns, records.collect()))
}
