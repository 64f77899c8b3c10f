//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{ExportProfile, QuotePolicy, SheetSelector};
use crate::cleanup::{Cleanup, DEFAULT_HEADER_SENTINEL};
use crate::error::XlsxToCsvError;
use crate::formatter::CellFormatter;
use crate::output::DelimitedWriter;
use crate::parser::{WorkbookReader, XlsxWorkbook};
use crate::table::{ImageLookup, Table};
use log::{debug, warn};
use std::io::{Read, Seek, Write};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 区切り文字（ASCII 1バイト）
    pub delimiter: u8,

    /// クォート方式
    pub quote_policy: QuotePolicy,

    /// ヘッダー行を出力するか
    pub keep_headers: bool,

    /// 出力プロファイル
    pub profile: ExportProfile,

    /// クリーンアップ有無の明示指定（Noneの場合はプロファイルに従う）
    pub apply_cleanup: Option<bool>,

    /// クリーンアップでヘッダー行を識別する接頭辞
    pub header_sentinel: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::Active,
            delimiter: b';',
            quote_policy: QuotePolicy::All,
            keep_headers: true,
            profile: ExportProfile::Standard,
            apply_cleanup: None,
            header_sentinel: DEFAULT_HEADER_SENTINEL.to_string(),
        }
    }
}

impl ConversionConfig {
    fn cleanup_enabled(&self) -> bool {
        self.apply_cleanup
            .unwrap_or_else(|| self.profile.applies_cleanup())
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcsv::{ConverterBuilder, ExportProfile, QuotePolicy};
///
/// # fn main() -> Result<(), xlsxcsv::XlsxToCsvError> {
/// let converter = ConverterBuilder::new()
///     .with_delimiter(b',')
///     .with_quote_policy(QuotePolicy::Minimal)
///     .with_profile(ExportProfile::Odoo)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: アクティブシート
    /// - 区切り文字: `;`
    /// - クォート: すべてのフィールド
    /// - ヘッダー行: 出力する
    /// - プロファイル: `Standard`（クリーンアップなし）
    /// - ヘッダー識別子: `Ref n.`
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 変換対象のシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxcsv::{ConverterBuilder, SheetSelector};
    ///
    /// // 名前で指定（存在しない場合はアクティブシート）
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Produtos".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 区切り文字を指定する
    ///
    /// ASCII文字のみ使用できます。`"`、`\r`、`\n`は`build()`時にエラーになります。
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// フィールドのクォート方式を指定する
    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.config.quote_policy = policy;
        self
    }

    /// ヘッダー行を出力するかを指定する
    ///
    /// * `true`: ヘッダー行を出力（デフォルト）
    /// * `false`: データ行のみ出力
    pub fn keep_headers(mut self, keep: bool) -> Self {
        self.config.keep_headers = keep;
        self
    }

    /// 出力プロファイルを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxcsv::{ConverterBuilder, ExportProfile};
    ///
    /// // 折り返し行の結合と#VALUE!の除去を行う
    /// let builder = ConverterBuilder::new()
    ///     .with_profile(ExportProfile::Odoo);
    /// ```
    pub fn with_profile(mut self, profile: ExportProfile) -> Self {
        self.config.profile = profile;
        self
    }

    /// プロファイルに関係なくクリーンアップの有無を指定する
    pub fn apply_cleanup(mut self, apply: bool) -> Self {
        self.config.apply_cleanup = Some(apply);
        self
    }

    /// クリーンアップでヘッダー行を識別する接頭辞を指定する
    pub fn with_header_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.config.header_sentinel = sentinel.into();
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)`: 設定が有効な場合、Converterインスタンス
    /// * `Err(XlsxToCsvError::Config)`: 区切り文字が無効な場合
    pub fn build(self) -> Result<Converter, XlsxToCsvError> {
        let delimiter = self.config.delimiter;

        if !delimiter.is_ascii() {
            return Err(XlsxToCsvError::Config(format!(
                "Delimiter must be a single ASCII character (got byte 0x{:02X})",
                delimiter
            )));
        }

        if matches!(delimiter, b'"' | b'\r' | b'\n') {
            return Err(XlsxToCsvError::Config(format!(
                "Invalid delimiter: {:?}",
                delimiter as char
            )));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// Excelワークブックを区切りテキストに変換するためのメインエントリーポイントです。
/// 構築後は不変で、スレッド間で共有できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcsv::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsxcsv::XlsxToCsvError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("produtos.xlsx")?;
/// let output = File::create("produtos.csv")?;
/// converter.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(),
            config,
        }
    }

    /// 出力プロファイル
    pub fn profile(&self) -> ExportProfile {
        self.config.profile
    }

    /// クリーンアップが有効か
    pub fn cleanup_enabled(&self) -> bool {
        self.config.cleanup_enabled()
    }

    /// ExcelファイルをCSVに変換
    ///
    /// 変換に失敗した場合、`output`には何も書き込まれません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 変換に成功した場合
    /// * `Err(XlsxToCsvError::Decode)` - XLSXとして解析できない場合
    /// * `Err(XlsxToCsvError::Validation)` - シートが空、またはヘッダー行が空の場合
    pub fn convert<R: Read + Seek, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<(), XlsxToCsvError> {
        let mut workbook = XlsxWorkbook::open(input)?;
        let bytes = self.convert_reader(&mut workbook)?;

        output.write_all(&bytes)?;
        output.flush()?;

        Ok(())
    }

    /// バイト列を変換
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxcsv::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsxcsv::XlsxToCsvError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let upload = std::fs::read("produtos.xlsx")?;
    /// let csv = converter.convert_bytes(&upload)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_bytes(&self, input: &[u8]) -> Result<Vec<u8>, XlsxToCsvError> {
        let mut workbook = XlsxWorkbook::open(input)?;
        self.convert_reader(&mut workbook)
    }

    /// ExcelファイルをCSV文字列に変換
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String, XlsxToCsvError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| XlsxToCsvError::Utf8(e.utf8_error()))
    }

    /// 任意の`WorkbookReader`から変換
    ///
    /// # 処理フロー
    ///
    /// 1. シート選択（名前指定が見つからない場合はアクティブシート）
    /// 2. 画像アンカーの取得（失敗した場合は画像なしとして続行）
    /// 3. セル値のグリッド取得とテーブル構築
    /// 4. `IMAGE`列の置き換え
    /// 5. 区切りテキストへのシリアライズ
    /// 6. クリーンアップ（有効な場合）
    pub fn convert_reader<WR: WorkbookReader + ?Sized>(
        &self,
        reader: &mut WR,
    ) -> Result<Vec<u8>, XlsxToCsvError> {
        // 1. シート選択
        let sheet = self.resolve_sheet(reader)?;
        debug!("converting sheet '{}'", sheet);

        // 2. 画像アンカー
        let anchors = match reader.anchored_images(&sheet) {
            Ok(anchors) => anchors,
            Err(e) => {
                warn!("ignoring images of sheet '{}': {}", sheet, e);
                Vec::new()
            }
        };
        let lookup = ImageLookup::from_anchors(&anchors);
        debug!("sheet '{}': {} anchored image(s)", sheet, lookup.len());

        // 3. テーブル構築
        let grid = reader.sheet_values(&sheet)?;
        let mut table = Table::from_grid(grid, &self.formatter)?;
        debug!(
            "sheet '{}': {} column(s), {} data row(s)",
            sheet,
            table.header().len(),
            table.rows().len()
        );

        // 4. IMAGE列
        if !lookup.is_empty() {
            table.substitute_images(&lookup);
        }

        // 5. シリアライズ
        let writer = DelimitedWriter::new(
            self.config.delimiter,
            self.config.quote_policy,
            self.config.keep_headers,
        );
        let mut text = writer.write_table(&table)?;

        // 6. クリーンアップ
        if self.cleanup_enabled() {
            let cleanup = Cleanup::with_header_sentinel(
                self.config.delimiter,
                self.config.header_sentinel.as_str(),
            );
            text = cleanup.apply(&text);
        }

        Ok(text.into_bytes())
    }

    fn resolve_sheet<WR: WorkbookReader + ?Sized>(
        &self,
        reader: &WR,
    ) -> Result<String, XlsxToCsvError> {
        if let SheetSelector::Name(name) = &self.config.sheet_selector {
            if reader.sheet_names().iter().any(|n| n == name) {
                return Ok(name.clone());
            }
            debug!("sheet '{}' not found, using the active sheet", name);
        }

        reader.active_sheet().ok_or_else(|| {
            XlsxToCsvError::Decode(calamine::Error::Msg("Workbook contains no worksheets"))
        })
    }
}
