//! 照合結果の絞り込み

use crate::matcher::MatchResult;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 一致状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Found,
    Unmatched,
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "found" | "matched" => Ok(MatchStatus::Found),
            "unmatched" | "notfound" | "not-found" => Ok(MatchStatus::Unmatched),
            _ => Err(format!("不明なステータス: {} (found/unmatched)", s)),
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Found => write!(f, "Found"),
            MatchStatus::Unmatched => write!(f, "Unmatched"),
        }
    }
}

/// 絞り込み条件（未指定の項目は条件なし）
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// 顧客（完全一致）
    pub customer: Option<String>,
    /// プロジェクト名（完全一致）
    pub project: Option<String>,
    /// 県（完全一致）
    pub province: Option<String>,
    pub status: Option<MatchStatus>,
    /// 顧客・プロジェクト・県・サービス種別・回線コードの部分一致（大文字小文字不問）
    pub query: Option<String>,
}

impl RecordFilter {
    pub fn accepts(&self, result: &MatchResult) -> bool {
        let exact = |want: &Option<String>, value: &str| {
            want.as_deref().map_or(true, |w| w.is_empty() || w == value)
        };

        if !exact(&self.customer, &result.customer)
            || !exact(&self.project, &result.project_name)
            || !exact(&self.province, &result.province)
        {
            return false;
        }

        match self.status {
            Some(MatchStatus::Found) if !result.matched => return false,
            Some(MatchStatus::Unmatched) if result.matched => return false,
            _ => {}
        }

        match self.query.as_deref().map(str::to_lowercase) {
            Some(q) if !q.is_empty() => [
                &result.customer,
                &result.project_name,
                &result.province,
                &result.service_type,
                &result.circuit_norm,
                &result.circuit_raw,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&q)),
            _ => true,
        }
    }

    /// 条件に合う結果を、一致 → 不一致の順（各グループ内は元の順）で返す
    pub fn apply<'a>(&self, results: &'a [MatchResult]) -> Vec<&'a MatchResult> {
        let mut selected: Vec<&MatchResult> = results.iter().filter(|r| self.accepts(r)).collect();
        selected.sort_by_key(|r| !r.matched);
        selected
    }
}
