//! Workbook Module
//!
//! calamineを使用したXLSXワークブックの読み込み。
//! セル値はcalamineから、アクティブシートと画像アンカーは`XlsxPackage`から取得します。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::error::XlsxToCsvError;
use crate::parser::package::XlsxPackage;
use crate::parser::WorkbookReader;
use crate::security::SecurityConfig;
use crate::types::{CellValue, ImageAnchor};

type SharedCursor = Cursor<Arc<[u8]>>;

/// XLSXワークブック
///
/// 入力全体をメモリに保持し、calamineとパッケージリーダーで同じバッファを共有します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcsv::{WorkbookReader, XlsxWorkbook};
///
/// # fn main() -> Result<(), xlsxcsv::XlsxToCsvError> {
/// let bytes = std::fs::read("produtos.xlsx")?;
/// let mut workbook = XlsxWorkbook::from_bytes(bytes)?;
/// let sheet = workbook.active_sheet().unwrap_or_default();
/// let rows = workbook.sheet_values(&sheet)?;
/// println!("{} rows", rows.len());
/// # Ok(())
/// # }
/// ```
pub struct XlsxWorkbook {
    workbook: Xlsx<SharedCursor>,
    package: XlsxPackage<SharedCursor>,
}

impl XlsxWorkbook {
    /// リーダーからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(XlsxWorkbook)` - 読み込みに成功した場合
    /// * `Err(XlsxToCsvError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxToCsvError::Decode)` - XLSXとして解析できない場合
    pub fn open<R: Read>(mut reader: R) -> Result<Self, XlsxToCsvError> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        SecurityConfig::default().check_input_size(bytes_read as u64)?;

        Self::from_bytes(buffer)
    }

    /// バイト列からワークブックを開く
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, XlsxToCsvError> {
        let shared: Arc<[u8]> = bytes.into();

        let workbook = match open_workbook_auto_from_rs(Cursor::new(Arc::clone(&shared)))? {
            Sheets::Xlsx(workbook) => workbook,
            _ => {
                return Err(XlsxToCsvError::Decode(calamine::Error::Msg(
                    "Only XLSX workbooks are supported",
                )))
            }
        };

        let package = XlsxPackage::open(Cursor::new(shared))?;

        Ok(Self { workbook, package })
    }
}

impl WorkbookReader for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    fn active_sheet(&self) -> Option<String> {
        self.package
            .active_sheet_name()
            .map(str::to_string)
            .or_else(|| self.workbook.sheet_names().first().cloned())
    }

    fn sheet_values(&mut self, sheet: &str) -> Result<Vec<Vec<CellValue>>, XlsxToCsvError> {
        let range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| XlsxToCsvError::Decode(e.into()))?;

        let Some((end_row, end_col)) = range.end() else {
            return Ok(Vec::new());
        };

        // calamineの範囲は最初の使用セルから始まるため、A1起点の絶対座標で読み直す
        let mut rows = Vec::with_capacity(end_row as usize + 1);
        for row in 0..=end_row {
            let mut cells = Vec::with_capacity(end_col as usize + 1);
            for col in 0..=end_col {
                let value = range
                    .get_value((row, col))
                    .map(to_cell_value)
                    .unwrap_or(CellValue::Empty);
                cells.push(value);
            }
            rows.push(cells);
        }

        Ok(rows)
    }

    fn anchored_images(&mut self, sheet: &str) -> Result<Vec<ImageAnchor>, XlsxToCsvError> {
        self.package.anchored_images(sheet)
    }
}

/// calamineのセル値を変換
fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::DateTime(datetime),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
