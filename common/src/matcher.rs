//! マスタ照合
//!
//! 展開済みの各コードをマスタ索引で引き、一致/不一致を判定する。
//! 結果は正規化コードで重複除去（先勝ち）し、件数は重複除去後に数える。

use crate::category::{derive_category, format_text};
use crate::flatten::ComparisonRow;
use crate::master::MasterIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 1コードの照合結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// ジョブID（保存時に呼び出し側が付与）
    #[serde(default)]
    pub job_id: Option<u64>,
    pub circuit_norm: String,
    pub circuit_raw: String,
    pub matched: bool,
    pub customer: String,
    pub project_name: String,
    pub province: String,
    pub service_type: String,
    pub service_category: String,
}

impl MatchResult {
    /// 表示用ステータス
    pub fn status(&self) -> &'static str {
        if self.matched {
            "Found"
        } else {
            "Unmatched"
        }
    }
}

/// 照合の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub job_id: Option<u64>,
    pub matched_total: usize,
    pub unmatched_total: usize,
    pub total_records: usize,
}

/// 照合結果一式
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareOutcome {
    pub summary: RunSummary,
    pub results: Vec<MatchResult>,
}

impl CompareOutcome {
    /// ジョブIDを集計と全結果に付与
    pub fn assign_job(&mut self, job_id: u64) {
        self.summary.job_id = Some(job_id);
        for result in &mut self.results {
            result.job_id = Some(job_id);
        }
    }

    /// 一致した結果のみ
    pub fn matched(&self) -> impl Iterator<Item = &MatchResult> {
        self.results.iter().filter(|r| r.matched)
    }
}

/// 1行を照合
pub fn match_row(row: &ComparisonRow, index: &MasterIndex) -> MatchResult {
    let code = &row.normalized_code;
    match index.get(code) {
        Some(record) => MatchResult {
            job_id: None,
            circuit_norm: code.clone(),
            circuit_raw: row.raw_code.clone(),
            matched: true,
            customer: format_text(&record.customer),
            project_name: format_text(&record.project_name),
            province: format_text(&record.province),
            service_type: record.service_type.clone(),
            service_category: derive_category(code, &record.service_type),
        },
        None => MatchResult {
            circuit_norm: code.clone(),
            circuit_raw: row.raw_code.clone(),
            ..Default::default()
        },
    }
}

/// 展開済みの行をまとめて照合し、重複除去と集計を行う
pub fn match_rows(rows: &[ComparisonRow], index: &MasterIndex) -> CompareOutcome {
    let mut seen: HashSet<&str> = HashSet::with_capacity(rows.len());
    let mut results: Vec<MatchResult> = Vec::new();
    for row in rows {
        if seen.insert(row.normalized_code.as_str()) {
            results.push(match_row(row, index));
        }
    }

    let matched_total = results.iter().filter(|r| r.matched).count();
    let unmatched_total = results.len() - matched_total;

    tracing::info!(
        codes = rows.len(),
        distinct = results.len(),
        matched_total,
        unmatched_total,
        "照合完了"
    );

    CompareOutcome {
        summary: RunSummary {
            job_id: None,
            matched_total,
            unmatched_total,
            total_records: matched_total + unmatched_total,
        },
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MatchOptions;
    use crate::table::{Cell, Table};

    fn index() -> MasterIndex {
        let table = Table::new(
            vec!["เลขวงจร".into(), "ลูกค้า".into(), "ชื่อโครงการ".into(), "จังหวัด".into(), "ประเภท".into()],
            vec![
                vec!["4261J0051".into(), " acme ".into(), "BACKBONE".into(), "เชียงใหม่".into(), "Data Communication".into()],
                vec!["1234A5678".into(), "บริษัท ทดสอบ".into(), Cell::Empty, "bangkok".into(), "voice:pri".into()],
            ],
        );
        MasterIndex::build(&table, &MatchOptions::default()).unwrap()
    }

    fn row(code: &str) -> ComparisonRow {
        ComparisonRow {
            normalized_code: code.into(),
            raw_code: code.into(),
        }
    }

    #[test]
    fn test_match_row_formats_attributes() {
        let result = match_row(&row("4261J0051"), &index());
        assert!(result.matched);
        assert_eq!(result.customer, "Acme");
        assert_eq!(result.project_name, "Backbone");
        assert_eq!(result.province, "เชียงใหม่");
        assert_eq!(result.service_type, "Data Communication");
        assert_eq!(result.service_category, "Broadband");
        assert_eq!(result.status(), "Found");
    }

    #[test]
    fn test_match_row_non_ascii_passthrough() {
        let result = match_row(&row("1234A5678"), &index());
        assert_eq!(result.customer, "บริษัท ทดสอบ");
        assert_eq!(result.project_name, "");
        assert_eq!(result.province, "Bangkok");
        assert_eq!(result.service_category, "Voice");
    }

    #[test]
    fn test_unmatched_fields_empty() {
        let result = match_row(&row("0000Z0000"), &index());
        assert!(!result.matched);
        assert_eq!(result.circuit_norm, "0000Z0000");
        assert_eq!(result.customer, "");
        assert_eq!(result.service_type, "");
        assert_eq!(result.service_category, "");
        assert_eq!(result.status(), "Unmatched");
    }

    #[test]
    fn test_match_rows_dedup_and_counts() {
        let rows = vec![
            row("1234A5678"),
            row("0000Z0000"),
            row("1234A5678"),
            row("0000Z0000"),
            row("4261J0051"),
        ];
        let outcome = match_rows(&rows, &index());
        let codes: Vec<&str> = outcome.results.iter().map(|r| r.circuit_norm.as_str()).collect();
        assert_eq!(codes, vec!["1234A5678", "0000Z0000", "4261J0051"]);
        assert_eq!(outcome.summary.matched_total, 2);
        assert_eq!(outcome.summary.unmatched_total, 1);
        assert_eq!(outcome.summary.total_records, 3);
        assert_eq!(outcome.matched().count(), 2);
    }

    #[test]
    fn test_assign_job() {
        let mut outcome = match_rows(&[row("1234A5678")], &index());
        assert_eq!(outcome.summary.job_id, None);
        outcome.assign_job(42);
        assert_eq!(outcome.summary.job_id, Some(42));
        assert!(outcome.results.iter().all(|r| r.job_id == Some(42)));
    }

    #[test]
    fn test_match_rows_empty() {
        let outcome = match_rows(&[], &index());
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.summary, RunSummary::default());
    }
}
