//! Table Module
//!
//! シートのグリッドからヘッダー付きテーブルを構築し、
//! `IMAGE`列の値をセルに固定された画像のbase64表現で置き換えるモジュール。

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;

use crate::error::XlsxToCsvError;
use crate::formatter::CellFormatter;
use crate::types::{CellCoord, CellValue, ImageAnchor};

/// 画像を埋め込む列の名前（完全一致）
pub const IMAGE_COLUMN: &str = "IMAGE";

/// セル座標 -> base64エンコード済み画像のルックアップ
///
/// 同じセルに複数のアンカーがある場合は、後のものが前のものを上書きします。
#[derive(Debug, Default, Clone)]
pub(crate) struct ImageLookup {
    images: HashMap<CellCoord, String>,
}

impl ImageLookup {
    /// アンカーの並び順でルックアップを構築
    pub fn from_anchors(anchors: &[ImageAnchor]) -> Self {
        let mut images = HashMap::new();
        for anchor in anchors {
            images.insert(anchor.cell, STANDARD.encode(&anchor.bytes));
        }
        Self { images }
    }

    pub fn get(&self, cell: CellCoord) -> Option<&str> {
        self.images.get(&cell).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// ヘッダー付きテーブル
///
/// 1行目がヘッダー（重複可）、2行目以降がデータ行です。
/// すべてのセルはテキストに変換済みで、各データ行はヘッダーと同じ幅を持ちます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// 行優先のグリッドからテーブルを構築
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 構築に成功した場合
    /// * `Err(XlsxToCsvError::Validation)` - グリッドが空、またはヘッダー行が空の場合
    pub fn from_grid(
        grid: Vec<Vec<CellValue>>,
        formatter: &CellFormatter,
    ) -> Result<Self, XlsxToCsvError> {
        let mut grid = grid.into_iter();

        let header_cells = grid.next().ok_or_else(XlsxToCsvError::empty_sheet)?;
        if header_cells.iter().all(CellValue::is_empty) {
            return Err(XlsxToCsvError::empty_sheet());
        }

        let header: Vec<String> = header_cells.iter().map(|v| formatter.format(v)).collect();
        let width = header.len();

        let rows = grid
            .map(|cells| {
                let mut row: Vec<String> = cells.iter().map(|v| formatter.format(v)).collect();
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// `IMAGE`列のインデックス（最初に一致した列）
    pub fn image_column(&self) -> Option<usize> {
        self.header.iter().position(|name| name == IMAGE_COLUMN)
    }

    /// `IMAGE`列の値を画像で置き換える
    ///
    /// データ行`i`（0始まり）はワークシートの`i + 2`行目（1始まり）に対応します。
    /// 対応するセルに画像がない行は元の値のままです。
    ///
    /// # 戻り値
    ///
    /// 置き換えた行数
    pub fn substitute_images(&mut self, lookup: &ImageLookup) -> usize {
        let Some(col) = self.image_column() else {
            return 0;
        };

        let mut replaced = 0;
        for (i, row) in self.rows.iter_mut().enumerate() {
            // ヘッダーがワークシートの1行目（0始まりで0）なので、データ行iは i + 1
            let cell = CellCoord::new(i as u32 + 1, col as u32);
            if let Some(encoded) = lookup.get(cell) {
                row[col] = encoded.to_string();
                replaced += 1;
            }
        }

        debug!(
            "inlined {} image(s) into column {}",
            replaced,
            CellCoord::col_index_to_letter(col as u32)
        );
        replaced
    }
}
