//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;

/// セルの値を表す列挙型
///
/// 数式セルの場合は、キャッシュされた計算結果が格納されます（数式文字列ではありません）。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 整数
    Int(i64),

    /// 浮動小数点数
    Float(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時
    DateTime(NaiveDateTime),

    /// エラー値（例: `#VALUE!`, `#DIV/0!`）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1", (1, 2) -> "C2"）
    pub fn to_a1_notation(self) -> String {
        format!("{}{}", Self::col_index_to_letter(self.col), self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    pub fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_a1_notation())
    }
}

/// セルに固定された画像
///
/// 描画パーツのアンカー（左上セル）と、画像の生バイト列の組です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAnchor {
    /// アンカーの左上セル（0始まり）
    pub cell: CellCoord,

    /// 画像データ（PNG、JPEGなど、パッケージに格納されたままのバイト列）
    pub bytes: Vec<u8>,
}

impl ImageAnchor {
    /// 新しいアンカーを生成
    pub fn new(cell: CellCoord, bytes: Vec<u8>) -> Self {
        Self { cell, bytes }
    }
}
