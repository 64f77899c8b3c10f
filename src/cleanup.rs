//! Cleanup Module
//!
//! シリアライズ済みテキストの後処理（Odooプロファイル用）。
//!
//! フィールド内の改行で複数の物理行に分かれた論理行を1行に結合し、
//! `#VALUE!`などのエラー値を取り除きます。
//!
//! 行の分類は次の2状態のステートマシンで行います。
//!
//! | 状態 | 行頭が`"`またはヘッダー識別子 | その他の行 |
//! | --- | --- | --- |
//! | `AwaitingRowStart` | 新しい行を開始 | トリムして新しい行を開始 |
//! | `AccumulatingRow` | 蓄積中の行を出力し、新しい行を開始 | トリムして半角スペースで連結 |
//!
//! これは再パースではなくヒューリスティックです。継続行がたまたま`"`で始まる場合や、
//! データ行がヘッダー識別子で始まる場合は、そこで行が分割されます。

use log::debug;

/// Excelの`#VALUE!`エラー値
const VALUE_ERROR_MARKER: &str = "#VALUE!";

/// デフォルトのヘッダー識別子
pub const DEFAULT_HEADER_SENTINEL: &str = "Ref n.";

const QUOTE: char = '"';

/// 物理行の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// 新しい論理行の開始
    RowStart,
    /// 折り返されたフィールドの続き
    Continuation,
}

#[derive(Debug)]
enum State {
    AwaitingRowStart,
    AccumulatingRow(String),
}

/// クリーンアップ処理
///
/// # 使用例
///
/// ```rust
/// use xlsxcsv::Cleanup;
///
/// let cleanup = Cleanup::new(b';');
/// let text = "\"Ref n.\";\"Name\"\n\"R1\";\"Wid\nget\"\n";
/// assert_eq!(cleanup.apply(text), "\"Ref n.\";\"Name\"\n\"R1\";\"Wid get\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleanup {
    delimiter: char,
    header_sentinel: Option<String>,
}

impl Cleanup {
    /// デフォルトのヘッダー識別子（`Ref n.`）でクリーンアップ処理を生成
    pub fn new(delimiter: u8) -> Self {
        Self::with_header_sentinel(delimiter, DEFAULT_HEADER_SENTINEL)
    }

    /// ヘッダー識別子を指定してクリーンアップ処理を生成
    ///
    /// 空文字列を渡すと、ヘッダー識別子による行頭判定は行いません。
    pub fn with_header_sentinel(delimiter: u8, header_sentinel: impl Into<String>) -> Self {
        let header_sentinel = header_sentinel.into();
        Self {
            delimiter: delimiter as char,
            header_sentinel: (!header_sentinel.is_empty()).then_some(header_sentinel),
        }
    }

    /// 物理行を分類
    pub fn classify(&self, line: &str) -> LineKind {
        let is_header = self
            .header_sentinel
            .as_deref()
            .is_some_and(|sentinel| line.starts_with(sentinel));

        if line.starts_with(QUOTE) || is_header {
            LineKind::RowStart
        } else {
            LineKind::Continuation
        }
    }

    /// テキスト全体にクリーンアップを適用
    ///
    /// 論理行は`\n`で連結され、末尾に改行は付きません。
    pub fn apply(&self, text: &str) -> String {
        let mut logical_lines: Vec<String> = Vec::new();
        let mut state = State::AwaitingRowStart;
        let mut physical = 0usize;

        for line in text.lines() {
            physical += 1;
            state = match (state, self.classify(line)) {
                (State::AwaitingRowStart, LineKind::RowStart) => {
                    State::AccumulatingRow(line.to_string())
                }
                (State::AwaitingRowStart, LineKind::Continuation) => {
                    State::AccumulatingRow(line.trim().to_string())
                }
                (State::AccumulatingRow(current), LineKind::RowStart) => {
                    if !current.is_empty() {
                        logical_lines.push(current);
                    }
                    State::AccumulatingRow(line.to_string())
                }
                (State::AccumulatingRow(mut current), LineKind::Continuation) => {
                    current.push(' ');
                    current.push_str(line.trim());
                    State::AccumulatingRow(current)
                }
            };
        }

        if let State::AccumulatingRow(current) = state {
            if !current.is_empty() {
                logical_lines.push(current);
            }
        }

        debug!(
            "cleanup merged {} physical line(s) into {} row(s)",
            physical,
            logical_lines.len()
        );

        logical_lines
            .iter()
            .map(|line| self.tidy(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 論理行の整形
    ///
    /// 1. `#VALUE!`を削除
    /// 2. `"<区切り文字><空白>"` を `"<区切り文字>"` に詰める
    /// 3. `"<空白>` を `"` に詰める
    fn tidy(&self, line: &str) -> String {
        let line = line.replace(VALUE_ERROR_MARKER, "");
        let line = self.tighten_delimiters(&line);
        self.strip_after_quotes(&line)
    }

    fn is_blank(&self, c: char) -> bool {
        // タブ区切りの場合、区切り文字自体は空白として扱わない
        c.is_whitespace() && c != self.delimiter
    }

    fn tighten_delimiters(&self, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len());
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == QUOTE && chars.get(i + 1) == Some(&self.delimiter) {
                let mut j = i + 2;
                while j < chars.len() && self.is_blank(chars[j]) {
                    j += 1;
                }
                if j > i + 2 && chars.get(j) == Some(&QUOTE) {
                    out.push(QUOTE);
                    out.push(self.delimiter);
                    // 次のクォートは次の一致の先頭になり得るので消費しない
                    i = j;
                    continue;
                }
            }
            out.push(chars[i]);
            i += 1;
        }

        out
    }

    fn strip_after_quotes(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            out.push(c);
            if c == QUOTE {
                while chars.peek().is_some_and(|&next| self.is_blank(next)) {
                    chars.next();
                }
            }
        }

        out
    }
}
