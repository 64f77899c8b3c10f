//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// 空シート、またはヘッダー行が空の場合のメッセージ
pub const EMPTY_SHEET_MESSAGE: &str = "Folha vazia ou sem cabeçalhos.";

/// xlsxcsvクレート全体で使用するエラー型
///
/// ワークブックのデコード、テーブル構築、区切りテキストへのシリアライズ中に
/// 発生するすべてのエラーを統一的に扱います。
///
/// 画像の抽出に失敗した場合はエラーにならず、該当画像がスキップされるだけです。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcsv::{ConverterBuilder, XlsxToCsvError};
///
/// let converter = ConverterBuilder::new().build().unwrap();
/// match converter.convert_bytes(b"not a workbook") {
///     Err(XlsxToCsvError::Decode(e)) => println!("壊れたファイル: {}", e),
///     Err(e) => println!("その他のエラー: {}", e),
///     Ok(_) => {}
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToCsvError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力バイト列がワークブックとして解析できない
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to decode workbook: {0}")]
    Decode(#[from] calamine::Error),

    /// UTF-8文字列の変換エラー
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// ZIPアーカイブの解析エラー
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// パッケージ内XMLの解析エラー
    #[error("XML parse error: {0}")]
    Xml(String),

    /// 数値の解析エラー
    #[error("Number parse error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// 区切りテキストの書き出しエラー
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// テーブルが変換できない状態（行なし、ヘッダーが空）
    ///
    /// メッセージはそのまま呼び出し元（HTTPレスポンスなど）に表示されます。
    #[error("{0}")]
    Validation(String),

    /// アップロードにファイルが含まれていない
    #[error("No file was uploaded")]
    MissingInput,

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時、または環境変数の読み込み時に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxcsv::{ConverterBuilder, XlsxToCsvError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_delimiter(b'"')
    ///     .build();
    ///
    /// match result {
    ///     Err(XlsxToCsvError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb、パストラバーサル、ファイルサイズ制限などに違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl XlsxToCsvError {
    /// 空シート用のバリデーションエラーを生成
    pub(crate) fn empty_sheet() -> Self {
        XlsxToCsvError::Validation(EMPTY_SHEET_MESSAGE.to_string())
    }
}

impl From<zip::result::ZipError> for XlsxToCsvError {
    fn from(err: zip::result::ZipError) -> Self {
        XlsxToCsvError::Zip(err.to_string())
    }
}

impl From<quick_xml::Error> for XlsxToCsvError {
    fn from(err: quick_xml::Error) -> Self {
        XlsxToCsvError::Xml(err.to_string())
    }
}
