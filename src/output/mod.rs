//! Output Module
//!
//! テーブルを区切りテキストへシリアライズするモジュール。
//! エスケープ処理は`csv`クレートに任せます。

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::api::QuotePolicy;
use crate::error::XlsxToCsvError;
use crate::table::Table;

/// 区切りテキストライター
///
/// 行末は常に`\n`です。フィールド内の改行はクォートされたまま出力されます。
#[derive(Debug, Clone, Copy)]
pub(crate) struct DelimitedWriter {
    delimiter: u8,
    quote_policy: QuotePolicy,
    keep_headers: bool,
}

impl DelimitedWriter {
    pub fn new(delimiter: u8, quote_policy: QuotePolicy, keep_headers: bool) -> Self {
        Self {
            delimiter,
            quote_policy,
            keep_headers,
        }
    }

    /// テーブルを区切りテキストに変換
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - ヘッダー行（`keep_headers`の場合）とデータ行。各行は`\n`で終わる
    /// * `Err(XlsxToCsvError::Csv)` - 書き出しに失敗した場合
    pub fn write_table(&self, table: &Table) -> Result<String, XlsxToCsvError> {
        let quote_style = match self.quote_policy {
            QuotePolicy::All => QuoteStyle::Always,
            QuotePolicy::Minimal => QuoteStyle::Necessary,
        };

        let mut buffer = Vec::new();
        {
            let mut csv_writer = WriterBuilder::new()
                .delimiter(self.delimiter)
                .quote_style(quote_style)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(&mut buffer);

            if self.keep_headers {
                csv_writer.write_record(table.header())?;
            }
            for row in table.rows() {
                csv_writer.write_record(row)?;
            }

            csv_writer.flush()?;
        }

        String::from_utf8(buffer).map_err(|e| XlsxToCsvError::Utf8(e.utf8_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::CellFormatter;
    use crate::types::CellValue;

    fn table(rows: &[&[&str]]) -> Table {
        let grid = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| {
                        if v.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::String(v.to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Table::from_grid(grid, &CellFormatter::new()).unwrap()
    }

    #[test]
    fn test_quote_all() {
        let t = table(&[&["Ref n.", "Name", "IMAGE"], &["R1", "Widget", ""]]);
        let out = DelimitedWriter::new(b';', QuotePolicy::All, true)
            .write_table(&t)
            .unwrap();
        assert_eq!(out, "\"Ref n.\";\"Name\";\"IMAGE\"\n\"R1\";\"Widget\";\"\"\n");
    }

    #[test]
    fn test_minimal_quoting() {
        let t = table(&[&["A", "B"], &["plain", "has;delim"], &["say \"hi\"", ""]]);
        let out = DelimitedWriter::new(b';', QuotePolicy::Minimal, true)
            .write_table(&t)
            .unwrap();
        assert_eq!(out, "A;B\nplain;\"has;delim\"\n\"say \"\"hi\"\"\";\n");
    }

    #[test]
    fn test_without_headers() {
        let t = table(&[&["A", "B"], &["1", "2"]]);
        let out = DelimitedWriter::new(b',', QuotePolicy::All, false)
            .write_table(&t)
            .unwrap();
        assert_eq!(out, "\"1\",\"2\"\n");
    }

    #[test]
    fn test_header_only_without_headers_is_empty() {
        let t = table(&[&["A", "B"]]);
        let out = DelimitedWriter::new(b';', QuotePolicy::All, false)
            .write_table(&t)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_embedded_newline_stays_quoted() {
        let t = table(&[&["A"], &["line one\nline two"]]);
        let out = DelimitedWriter::new(b';', QuotePolicy::Minimal, false)
            .write_table(&t)
            .unwrap();
        assert_eq!(out, "\"line one\nline two\"\n");
    }
}
