//! 比較表の展開
//!
//! 各行のセル値を連結して回線コードを抽出し、1コード1行に展開する。
//! 列名にだけ現れるコード（列見出しに回線番号を使っている表）も拾う。

use crate::extract::extract_all;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 展開後の1行（1コード）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub normalized_code: String,
    pub raw_code: String,
}

impl ComparisonRow {
    fn from_code(code: String) -> Self {
        Self {
            raw_code: code.clone(),
            normalized_code: code,
        }
    }
}

/// 行のセル値を空白区切りで連結
pub fn row_text(table: &Table, row: usize) -> String {
    table
        .rows()
        .get(row)
        .map(|cells| {
            cells
                .iter()
                .map(|cell| cell.as_text())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// 比較表を1コード1行に展開する
///
/// 行由来のコード（行順・行内は左から）のあと、行に現れなかった列名由来のコードを追加する。
pub fn flatten(table: &Table) -> Vec<ComparisonRow> {
    let header_codes = extract_all(&table.columns().join(" "));

    let mut rows = Vec::new();
    let mut dropped = 0;

    for index in 0..table.len() {
        let codes = extract_all(&row_text(table, index));
        if codes.is_empty() {
            dropped += 1;
            continue;
        }
        rows.extend(codes.into_iter().map(ComparisonRow::from_code));
    }

    let mut seen: HashSet<String> = rows.iter().map(|r| r.normalized_code.clone()).collect();
    let mut header_only = 0;
    for code in header_codes {
        if seen.insert(code.clone()) {
            header_only += 1;
            rows.push(ComparisonRow::from_code(code));
        }
    }

    tracing::debug!(
        source_rows = table.len(),
        dropped,
        header_only,
        codes = rows.len(),
        "比較表を展開"
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn codes(rows: &[ComparisonRow]) -> Vec<&str> {
        rows.iter().map(|r| r.normalized_code.as_str()).collect()
    }

    #[test]
    fn test_flatten_joins_cells() {
        let table = Table::new(
            vec!["note".into(), "id".into()],
            vec![vec!["circuit 1234-A".into(), "-5678 note".into()]],
        );
        let rows = flatten(&table);
        assert_eq!(codes(&rows), vec!["1234A5678"]);
        assert_eq!(rows[0].raw_code, rows[0].normalized_code);
    }

    #[test]
    fn test_flatten_explodes_multiple_codes() {
        let table = Table::new(
            vec!["remark".into()],
            vec![vec!["1234A5678 and 9999Z1111".into()]],
        );
        assert_eq!(codes(&flatten(&table)), vec!["1234A5678", "9999Z1111"]);
    }

    #[test]
    fn test_flatten_drops_rows_without_codes() {
        let table = Table::new(
            vec!["a".into()],
            vec![
                vec!["nothing here".into()],
                vec![Cell::Empty],
                vec![Cell::Int(1234)],
                vec!["1111B2222".into()],
            ],
        );
        assert_eq!(codes(&flatten(&table)), vec!["1111B2222"]);
    }

    #[test]
    fn test_flatten_keeps_row_duplicates() {
        let table = Table::new(
            vec!["a".into()],
            vec![vec!["1234A5678".into()], vec!["1234-a-5678".into()]],
        );
        assert_eq!(flatten(&table).len(), 2);
    }

    #[test]
    fn test_flatten_header_only_code_appended() {
        let table = Table::new(
            vec!["4261X0051".into(), "note".into()],
            vec![vec!["1234A5678".into(), Cell::Empty]],
        );
        assert_eq!(codes(&flatten(&table)), vec!["1234A5678", "4261X0051"]);
    }

    #[test]
    fn test_flatten_header_code_already_in_rows() {
        let table = Table::new(
            vec!["1234A5678".into()],
            vec![vec!["1234 A 5678".into()]],
        );
        assert_eq!(codes(&flatten(&table)), vec!["1234A5678"]);
    }

    #[test]
    fn test_flatten_header_only_table() {
        let table = Table::new(vec!["4261X0051".into(), "4261X0051".into()], vec![]);
        assert_eq!(codes(&flatten(&table)), vec!["4261X0051"]);
    }
}
