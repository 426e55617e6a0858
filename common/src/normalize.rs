//! 回線コードの字形正規化
//!
//! - タイ数字（๐〜๙）・全角数字（０〜９）→ 半角数字
//! - X に似た字形（×, ✕, ギリシャ文字 Χ, キリル文字 Х, 全角 Ｘ など）→ `X`
//! - 英数字以外（空白、NBSP、ハイフン、アンダースコア、ドット、スラッシュ等）を除去
//! - 大文字化

use crate::table::Cell;

/// X とみなす字形（ラテン/数学記号/ギリシャ/キリル/全角）
pub const X_LIKE: [char; 10] = ['x', 'X', '×', '✕', 'Χ', 'χ', 'Х', 'х', 'Ｘ', 'ｘ'];

/// タイ数字・全角数字を半角数字に変換
pub fn to_ascii_digit(c: char) -> char {
    match c {
        '๐'..='๙' => char::from(b'0' + (c as u32 - '๐' as u32) as u8),
        '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
        _ => c,
    }
}

/// X に似た字形を `X` に統一
pub fn unify_x_like(c: char) -> char {
    if X_LIKE.contains(&c) {
        'X'
    } else {
        c
    }
}

/// 数字とXの字形だけを統一する（区切り文字は残す）
///
/// 抽出パターンの照合前に適用する。文字数は変わらない。
pub fn unify_glyphs(text: &str) -> String {
    text.chars().map(|c| unify_x_like(to_ascii_digit(c))).collect()
}

/// 回線コードを正規化する
///
/// 冪等: `normalize_code(&normalize_code(s)) == normalize_code(s)`
pub fn normalize_code(text: &str) -> String {
    text.chars()
        .map(|c| unify_x_like(to_ascii_digit(c)))
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// セル値を正規化する（欠損は空文字列）
pub fn normalize_cell(cell: &Cell) -> String {
    normalize_code(&cell.as_text())
}
