//! マスタ索引
//!
//! マスタ表のキー列を正規化し、回線コード → 属性のマップを構築する。
//! 同じ正規化キーが複数行にある場合は表の先頭側の行を採用する。

use crate::error::{Error, Result};
use crate::normalize::normalize_cell;
use crate::options::MatchOptions;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// マスタの1レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterRecord {
    pub customer: String,
    pub project_name: String,
    pub province: String,
    /// サービス種別（`:` 区切りの複合値もそのまま保持）
    pub service_type: String,
    /// その他の列（列名 → 値、空セルは含まない）
    pub extra: BTreeMap<String, String>,
}

/// 正規化コード → マスタレコード
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    records: HashMap<String, MasterRecord>,
    duplicate_keys: usize,
}

impl MasterIndex {
    /// マスタ表から索引を構築
    ///
    /// キー列が存在しない場合は [`Error::MissingKeyColumn`]。
    pub fn build(table: &Table, options: &MatchOptions) -> Result<Self> {
        let key_col = table
            .column_index(&options.key_column)
            .ok_or_else(|| Error::missing_key_column(&options.key_column, table.columns()))?;

        let mut records: HashMap<String, MasterRecord> = HashMap::with_capacity(table.len());
        let mut duplicate_keys = 0;
        let mut blank_keys = 0;

        for row in 0..table.len() {
            let key = normalize_cell(table.cell(row, key_col));
            if key.is_empty() {
                blank_keys += 1;
                continue;
            }
            if records.contains_key(&key) {
                duplicate_keys += 1;
                continue;
            }
            records.insert(key, read_record(table, row, key_col, options));
        }

        tracing::debug!(
            records = records.len(),
            duplicate_keys,
            blank_keys,
            key_column = %options.key_column,
            "マスタ索引を構築"
        );

        Ok(Self { records, duplicate_keys })
    }

    pub fn get(&self, code: &str) -> Option<&MasterRecord> {
        self.records.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 先頭行優先で捨てた重複キーの数
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }
}

fn read_record(table: &Table, row: usize, key_col: usize, options: &MatchOptions) -> MasterRecord {
    let text_of = |name: &str| {
        table
            .cell_by_name(row, name)
            .map(|cell| cell.as_text().into_owned())
            .unwrap_or_default()
    };

    let fixed = [
        options.customer_column.as_str(),
        options.project_column.as_str(),
        options.province_column.as_str(),
    ];

    let extra = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(col, name)| *col != key_col && !fixed.contains(&name.as_str()))
        .filter_map(|(col, name)| {
            let cell = table.cell(row, col);
            (!cell.is_missing()).then(|| (name.clone(), cell.as_text().into_owned()))
        })
        .collect();

    MasterRecord {
        customer: text_of(&options.customer_column),
        project_name: text_of(&options.project_column),
        province: text_of(&options.province_column),
        service_type: pick_service_type(table, row, &options.service_type_columns),
        extra,
    }
}

/// 候補列を順に見て、最初に値がある列のサービス種別を返す
pub fn pick_service_type(table: &Table, row: usize, candidates: &[String]) -> String {
    candidates
        .iter()
        .filter_map(|name| table.cell_by_name(row, name))
        .find(|cell| !cell.is_missing())
        .map(|cell| cell.as_text().into_owned())
        .unwrap_or_default()
}
