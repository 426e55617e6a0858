//! 自由記述テキストからの回線コード抽出
//!
//! ## 文法
//! 1. 英字型: 数字4桁 + 英字1文字 + 数字4桁（例: `1234 A 5678`）
//! 2. ID型: 数字4桁 + `ID` + 数字3桁以上（例: `1234-id-005`、大文字小文字不問）
//!
//! トークン間の区切り（空白、タブ、NBSP、`-`、`_`、`.`、`/`）は何個あってもよい。
//! 前後に英数字が隣接する候補、直前15文字に「old」「เก่า」がある候補（旧回線）は除外する。

use crate::normalize::{normalize_code, unify_glyphs};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// 旧回線マーカーを探す範囲（候補の直前の文字数）
pub const RETIRED_MARKER_WINDOW: usize = 15;

lazy_static! {
    static ref ALPHA_PATTERN: Regex = Regex::new(
        r"([0-9]{4})[ \t\u{00A0}\-_./]*([A-Za-z])[ \t\u{00A0}\-_./]*([0-9]{4})"
    )
    .unwrap();
    static ref ID_PATTERN: Regex = Regex::new(
        r"(?i)([0-9]{4})[ \t\u{00A0}\-_./]*I[ \t\u{00A0}\-_./]*D[ \t\u{00A0}\-_./]*([0-9]{3,})"
    )
    .unwrap();
    static ref RETIRED_MARKER: Regex = Regex::new(r"(?i)(เก่า|old)").unwrap();
}

/// 抽出文法（パターンとコード組み立て関数の組）
struct Grammar {
    name: &'static str,
    pattern: &'static Regex,
    assemble: fn(&Captures) -> String,
}

fn assemble_alpha(caps: &Captures) -> String {
    format!("{}{}{}", &caps[1], &caps[2], &caps[3])
}

fn assemble_id(caps: &Captures) -> String {
    format!("{}ID{}", &caps[1], &caps[2])
}

fn grammars() -> [Grammar; 2] {
    [
        Grammar {
            name: "alpha",
            pattern: &ALPHA_PATTERN,
            assemble: assemble_alpha,
        },
        Grammar {
            name: "id",
            pattern: &ID_PATTERN,
            assemble: assemble_id,
        },
    ]
}

/// テキスト中の回線コードをすべて抽出する
///
/// 出現順（左から右）に正規化済みコードを返す。重複は除去しない。
pub fn extract_all(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let unified = unify_glyphs(text);
    let mut found: Vec<(usize, String)> = Vec::new();

    for grammar in grammars() {
        scan(&unified, &grammar, &mut found);
    }

    // 文法ごとの走査結果を出現位置順に並べる
    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, code)| code).collect()
}

/// 1つの文法でテキストを走査
fn scan(text: &str, grammar: &Grammar, found: &mut Vec<(usize, String)>) {
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = grammar.pattern.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        let (start, end) = (whole.start(), whole.end());

        // 英数字が隣接している位置は候補にならない。次の文字から再走査
        if !is_isolated(text, start, end) {
            pos = next_char_boundary(text, start);
            continue;
        }
        pos = end;

        if is_retired(text, start) {
            tracing::trace!(grammar = grammar.name, candidate = whole.as_str(), "旧回線マーカーにより除外");
            continue;
        }

        let code = normalize_code(&(grammar.assemble)(&caps));
        if !code.is_empty() {
            found.push((start, code));
        }
    }
}

/// 前後に英数字が隣接していないか
fn is_isolated(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_alphanumeric())
        && !after.is_some_and(|c| c.is_ascii_alphanumeric())
}

/// 直前の一定文字数に旧回線マーカーがあるか
fn is_retired(text: &str, start: usize) -> bool {
    RETIRED_MARKER.is_match(preceding_window(text, start, RETIRED_MARKER_WINDOW))
}

/// `start` の直前 `chars` 文字分のスライス
fn preceding_window(text: &str, start: usize, chars: usize) -> &str {
    let head = &text[..start];
    let from = head
        .char_indices()
        .rev()
        .nth(chars.saturating_sub(1))
        .map_or(0, |(i, _)| i);
    &head[from..]
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(text.len(), |c| index + c.len_utf8())
}
