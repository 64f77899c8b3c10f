//! Parser Module
//!
//! ワークブックの読み込みを抽象化する`WorkbookReader`トレイトと、
//! XLSX向けの実装（calamine + ZIP/XML直接解析）を提供します。

mod package;
mod path;
mod workbook;

pub use workbook::XlsxWorkbook;

use crate::error::XlsxToCsvError;
use crate::types::{CellValue, ImageAnchor};

/// ワークブック読み込み機能
///
/// 変換処理が必要とする機能は「シートの値を行優先で取得する」ことと
/// 「シートに固定された画像を取得する」ことだけです。
/// XLSXコンテナを解析できるライブラリであれば、どれでも実装できます。
pub trait WorkbookReader {
    /// ワークブック内のシート名（宣言順）
    fn sheet_names(&self) -> Vec<String>;

    /// アクティブシート名（シートがない場合は`None`）
    fn active_sheet(&self) -> Option<String>;

    /// シートの値を行優先の密なグリッドとして取得
    ///
    /// グリッドはA1セルから始まり、最後に使用されている行・列まで続きます。
    /// 数式セルはキャッシュされた計算結果を返します。
    fn sheet_values(&mut self, sheet: &str) -> Result<Vec<Vec<CellValue>>, XlsxToCsvError>;

    /// シートに固定された画像（出現順）
    fn anchored_images(&mut self, sheet: &str) -> Result<Vec<ImageAnchor>, XlsxToCsvError>;
}
