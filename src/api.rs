//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 変換対象のワークシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// ワークブックでアクティブに指定されているシート（デフォルト）
    #[default]
    Active,

    /// シート名指定
    ///
    /// 指定した名前のシートが存在しない場合は、アクティブシートにフォールバックします。
    ///
    /// 例: `SheetSelector::Name("Produtos".to_string())`
    Name(String),
}

impl SheetSelector {
    /// 空文字列をアクティブシートとして扱うヘルパー
    ///
    /// フォームの未入力値をそのまま渡せるようにするためのものです。
    pub fn from_optional_name(name: Option<&str>) -> Self {
        match name {
            Some(name) if !name.is_empty() => SheetSelector::Name(name.to_string()),
            _ => SheetSelector::Active,
        }
    }
}

/// フィールドのクォート方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum QuotePolicy {
    /// すべてのフィールドをダブルクォートで囲む（デフォルト）
    ///
    /// ```text
    /// "Ref n.";"Name";"IMAGE"
    /// "R1";"Widget";""
    /// ```
    #[default]
    All,

    /// 区切り文字、ダブルクォート、改行を含むフィールドのみ囲む
    ///
    /// ```text
    /// Ref n.;Name;IMAGE
    /// R1;"Wid;get";
    /// ```
    Minimal,
}

/// 出力プロファイル
///
/// 後処理の有無と出力ファイル名の接尾辞を決定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ExportProfile {
    /// 汎用CSV出力（デフォルト）
    ///
    /// クリーンアップ処理なし。出力ファイル名は `<name>.csv`。
    #[default]
    Standard,

    /// Odooインポート向け出力
    ///
    /// シリアライズ後にクリーンアップ処理（折り返し行の結合、`#VALUE!`の除去）を行います。
    /// 出力ファイル名は `<name>_odoo.csv`。
    Odoo,
}

impl ExportProfile {
    /// このプロファイルで既定のクリーンアップ有無
    pub fn applies_cleanup(self) -> bool {
        matches!(self, ExportProfile::Odoo)
    }

    /// 出力ファイル名の接尾辞（拡張子を含む）
    pub fn file_suffix(self) -> &'static str {
        match self {
            ExportProfile::Standard => ".csv",
            ExportProfile::Odoo => "_odoo.csv",
        }
    }
}
