//! ジョブサマリー
//!
//! 一致した回線を (顧客, プロジェクト, 県, サービス区分) ごとにまとめ、
//! 回線数とプロジェクトのSLAを付ける。

use crate::matcher::MatchResult;
use crate::table::{format_number, Cell, Table};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// プロジェクト名 → SLA
#[derive(Debug, Clone, Default)]
pub struct SlaLookup {
    by_project: HashMap<String, String>,
}

impl SlaLookup {
    /// マスタ表から構築（同じプロジェクトは先頭行優先、列がなければ空）
    pub fn from_table(master: &Table, project_column: &str, sla_column: &str) -> Self {
        let (Some(project_col), Some(sla_col)) =
            (master.column_index(project_column), master.column_index(sla_column))
        else {
            tracing::debug!(project_column, sla_column, "SLA列がないためSLAなしで集計");
            return Self::default();
        };

        let mut by_project: HashMap<String, Option<String>> = HashMap::new();
        for row in 0..master.len() {
            let key = project_key(&master.cell(row, project_col).as_text());
            by_project
                .entry(key)
                .or_insert_with(|| format_sla(master.cell(row, sla_col)));
        }

        // 空セルのSLAは未設定扱い
        Self {
            by_project: by_project
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect(),
        }
    }

    pub fn get(&self, project: &str) -> Option<&str> {
        self.by_project.get(&project_key(project)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_project.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_project.is_empty()
    }
}

fn project_key(project: &str) -> String {
    project.trim().to_lowercase()
}

/// SLA値の表示形式（整数値は小数部なし）
pub fn format_sla(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => Some(format_number(*n)),
        Cell::Int(n) => Some(n.to_string()),
        Cell::Bool(_) => Some(cell.as_text().into_owned()),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            match s.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(format_number(n)),
                _ => Some(s.to_string()),
            }
        }
    }
}

/// サマリーの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// 1始まりの行番号
    pub index: usize,
    pub customer: String,
    pub project_name: String,
    pub sla: Option<String>,
    pub province: String,
    pub category: String,
    /// 重複なし・昇順の回線コード
    pub circuits: Vec<String>,
}

impl SummaryRow {
    /// 「区分 : 件数」形式のラベル
    pub fn category_label(&self) -> String {
        format!("{} : {}", self.category, self.circuits.len())
    }

    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    pub fn circuits_joined(&self) -> String {
        self.circuits.join(", ")
    }
}

/// 一致した結果をグループ化してサマリーを作る
///
/// グループの順序は最初に出現した順。
pub fn summarize(results: &[MatchResult], sla: &SlaLookup) -> Vec<SummaryRow> {
    type GroupKey = (String, String, String, String);

    let mut order: Vec<GroupKey> = Vec::new();
    let mut groups: HashMap<GroupKey, BTreeSet<String>> = HashMap::new();

    for result in results.iter().filter(|r| r.matched) {
        let code = result.circuit_norm.trim().to_uppercase();
        if code.is_empty() {
            continue;
        }
        let key = (
            result.customer.trim().to_string(),
            result.project_name.trim().to_string(),
            result.province.trim().to_string(),
            result.service_category.clone(),
        );
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                BTreeSet::new()
            })
            .insert(code);
    }

    order
        .into_iter()
        .enumerate()
        .filter_map(|(i, key)| {
            let circuits = groups.remove(&key)?;
            let (customer, project_name, province, category) = key;
            Some(SummaryRow {
                index: i + 1,
                sla: sla.get(&project_name).map(str::to_string),
                customer,
                project_name,
                province,
                category,
                circuits: circuits.into_iter().collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(code: &str, customer: &str, project: &str, category: &str) -> MatchResult {
        MatchResult {
            circuit_norm: code.into(),
            circuit_raw: code.into(),
            matched: true,
            customer: customer.into(),
            project_name: project.into(),
            province: "Bangkok".into(),
            service_type: category.into(),
            service_category: category.into(),
            ..Default::default()
        }
    }

    fn sla_table() -> Table {
        Table::new(
            vec!["ชื่อโครงการ".into(), "SLA".into()],
            vec![
                vec![" Backbone ".into(), Cell::Number(99.0)],
                vec!["backbone".into(), Cell::Number(95.0)],
                vec!["Metro".into(), "99.95".into()],
                vec!["Rural".into(), Cell::Empty],
            ],
        )
    }

    #[test]
    fn test_sla_lookup_first_row_wins() {
        let sla = SlaLookup::from_table(&sla_table(), "ชื่อโครงการ", "SLA");
        assert_eq!(sla.get("BACKBONE"), Some("99"));
        assert_eq!(sla.get("metro"), Some("99.95"));
        assert_eq!(sla.get("Rural"), None);
        assert_eq!(sla.len(), 2);
    }

    #[test]
    fn test_sla_lookup_missing_column() {
        let sla = SlaLookup::from_table(&sla_table(), "ชื่อโครงการ", "ไม่มี");
        assert!(sla.is_empty());
    }

    #[test]
    fn test_format_sla() {
        assert_eq!(format_sla(&Cell::Empty), None);
        assert_eq!(format_sla(&"  ".into()), None);
        assert_eq!(format_sla(&Cell::Number(4.0)), Some("4".into()));
        assert_eq!(format_sla(&"4.0".into()), Some("4".into()));
        assert_eq!(format_sla(&"24x7".into()), Some("24x7".into()));
    }

    #[test]
    fn test_summarize_groups_and_counts() {
        let results = vec![
            matched("1234A5678", "Acme", "Backbone", "Broadband"),
            matched("1111B2222", "Acme", "Backbone", "Broadband"),
            matched("1234A5678", "Acme", "Backbone", "Broadband"),
            matched("3333C4444", "Acme", "Metro", "Data"),
            MatchResult {
                circuit_norm: "9999Z9999".into(),
                ..Default::default()
            },
        ];
        let sla = SlaLookup::from_table(&sla_table(), "ชื่อโครงการ", "SLA");
        let rows = summarize(&results, &sla);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].circuits, vec!["1111B2222", "1234A5678"]);
        assert_eq!(rows[0].category_label(), "Broadband : 2");
        assert_eq!(rows[0].sla.as_deref(), Some("99"));
        assert_eq!(rows[0].circuits_joined(), "1111B2222, 1234A5678");
        assert_eq!(rows[1].project_name, "Metro");
        assert_eq!(rows[1].circuit_count(), 1);
        assert_eq!(rows[1].sla.as_deref(), Some("99.95"));
    }

    #[test]
    fn test_summarize_ignores_unmatched() {
        let results = vec![MatchResult {
            circuit_norm: "1234A5678".into(),
            ..Default::default()
        }];
        assert!(summarize(&results, &SlaLookup::default()).is_empty());
    }
}
