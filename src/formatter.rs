//! Formatter Module
//!
//! セル値をテキストに変換する処理を提供するモジュール。

use crate::types::CellValue;

/// 日時の出力形式
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// セルフォーマッター
///
/// キャッシュ値を区切りテキストのフィールドとして出力できる文字列に変換します。
/// 空セルはプレースホルダーではなく空文字列になります。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter;

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self
    }

    /// セル値をフォーマット
    ///
    /// | 値 | 出力 |
    /// | --- | --- |
    /// | 空 | `""` |
    /// | 整数 | `42` |
    /// | 浮動小数点数 | `1`（1.0）, `1.5` |
    /// | 論理値 | `True` / `False` |
    /// | 日時 | `2025-01-02 00:00:00` |
    /// | エラー | `#VALUE!` など |
    pub fn format(&self, value: &CellValue) -> String {
        match value {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => self.format_float(*f),
            CellValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            CellValue::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }

    /// 浮動小数点数をフォーマット
    ///
    /// 最短の往復可能表現を使用します。整数値の場合は小数点以下を出力しません。
    fn format_float(&self, value: f64) -> String {
        if value.is_finite() {
            value.to_string()
        } else {
            String::new()
        }
    }
}
