//! Web Boundary Module
//!
//! HTTPフレームワークに依存しない、アップロードフォームと変換処理の対応付け。
//! `GET /` と `POST /convert` のハンドラーを、ステータス・ヘッダー・ボディの組として返します。

use log::warn;
use serde::Deserialize;

use crate::api::{ExportProfile, QuotePolicy, SheetSelector};
use crate::builder::ConverterBuilder;
use crate::error::XlsxToCsvError;

/// アップロードフォーム（`GET /`）
pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="pt">
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>Excel -&gt; CSV</title>
</head>
<body>
<h1>Excel -&gt; CSV</h1>
<form action="/convert" method="post" enctype="multipart/form-data">
<p><input name="file" type="file" accept=".xlsx" required /></p>
<p><label>Folha <input name="sheet" type="text" placeholder="(ativa)" /></label></p>
<p><label>Delimitador <input name="delimiter" type="text" value=";" maxlength="1" size="2" /></label></p>
<p><label><input name="quoteall" type="checkbox" value="1" checked /> Aspas em todos os campos</label></p>
<p><label><input name="keep_headers" type="checkbox" value="1" checked /> Manter cabeçalhos</label></p>
<button type="submit">Converter</button>
</form>
</body>
</html>
"#;

/// `file`パートがない場合のメッセージ
pub const MISSING_FILE_MESSAGE: &str = "Ficheiro não enviado.";

/// 変換失敗時のメッセージ接頭辞
pub const CONVERSION_ERROR_PREFIX: &str = "Erro a converter: ";

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// ファイル名がない場合の既定値
const DEFAULT_UPLOAD_NAME: &str = "export.xlsx";

/// 既定の待ち受けポート
pub const DEFAULT_PORT: u16 = 8000;

/// 待ち受けアドレス（全インターフェース）
pub const BIND_HOST: &str = "0.0.0.0";

/// `POST /convert` のテキストフィールド
///
/// 未送信のフィールドは`None`になります。
///
/// # 使用例
///
/// ```rust
/// use xlsxcsv::ConvertForm;
///
/// let form = ConvertForm {
///     delimiter: Some(",".to_string()),
///     quoteall: Some("0".to_string()),
///     ..ConvertForm::default()
/// };
/// assert!(form.builder().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertForm {
    pub delimiter: Option<String>,
    pub quoteall: Option<String>,
    pub keep_headers: Option<String>,
    pub sheet: Option<String>,
}

impl ConvertForm {
    /// フォームの値から`ConverterBuilder`を構成
    ///
    /// * `delimiter` - 未送信または空なら`;`。1文字のASCII以外はエラー
    /// * `quoteall`, `keep_headers` - 値が`"1"`の場合のみ有効。未送信なら有効
    /// * `sheet` - 空ならアクティブシート
    pub fn builder(&self) -> Result<ConverterBuilder, XlsxToCsvError> {
        let delimiter = match self.delimiter.as_deref() {
            None | Some("") => b';',
            Some(value) => match value.as_bytes() {
                [byte] => *byte,
                _ => {
                    return Err(XlsxToCsvError::Config(format!(
                        "Delimiter must be a single character, got {:?}",
                        value
                    )))
                }
            },
        };

        let quote_policy = if flag(self.quoteall.as_deref()) {
            QuotePolicy::All
        } else {
            QuotePolicy::Minimal
        };

        Ok(ConverterBuilder::new()
            .with_sheet_selector(SheetSelector::from_optional_name(self.sheet.as_deref()))
            .with_delimiter(delimiter)
            .with_quote_policy(quote_policy)
            .keep_headers(flag(self.keep_headers.as_deref())))
    }
}

fn flag(value: Option<&str>) -> bool {
    value.map_or(true, |v| v == "1")
}

/// アップロードされたファイル
#[derive(Debug, Clone, Default)]
pub struct Upload {
    /// クライアントが送信したファイル名
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }
}

/// HTTPレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ConvertResponse {
    fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
        }
    }

    /// エラーを`400`レスポンスに変換
    pub fn from_error(error: &XlsxToCsvError) -> Self {
        let message = match error {
            XlsxToCsvError::MissingInput => MISSING_FILE_MESSAGE.to_string(),
            other => format!("{}{}", CONVERSION_ERROR_PREFIX, other),
        };
        Self::new(400, TEXT_CONTENT_TYPE, message.into_bytes())
    }

    /// ヘッダー値を取得（大文字小文字を区別しない）
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// `GET /`
pub fn handle_index() -> ConvertResponse {
    ConvertResponse::new(200, HTML_CONTENT_TYPE, INDEX_HTML.as_bytes().to_vec())
}

/// `POST /convert`
///
/// `Odoo`プロファイルではフォームのテキストフィールドを使用せず、既定値で変換します。
/// 失敗した場合は常に`400`とプレーンテキストのメッセージを返します。
pub fn handle_convert(
    upload: Option<&Upload>,
    form: &ConvertForm,
    profile: ExportProfile,
) -> ConvertResponse {
    match convert_upload(upload, form, profile) {
        Ok(response) => response,
        Err(e) => {
            warn!("conversion request failed: {}", e);
            ConvertResponse::from_error(&e)
        }
    }
}

fn convert_upload(
    upload: Option<&Upload>,
    form: &ConvertForm,
    profile: ExportProfile,
) -> Result<ConvertResponse, XlsxToCsvError> {
    let upload = upload.ok_or(XlsxToCsvError::MissingInput)?;

    let builder = match profile {
        ExportProfile::Standard => form.builder()?,
        ExportProfile::Odoo => ConverterBuilder::new(),
    };
    let converter = builder.with_profile(profile).build()?;
    let body = converter.convert_bytes(&upload.bytes)?;

    let filename = output_filename(upload.filename.as_deref(), profile);
    let mut response = ConvertResponse::new(200, CSV_CONTENT_TYPE, body);
    response.headers.push((
        "Content-Disposition".to_string(),
        format!("attachment; filename={}", filename),
    ));

    Ok(response)
}

/// 出力ファイル名を生成
///
/// 最後の拡張子を取り除き、プロファイルの接尾辞を付けます。
/// ヘッダーインジェクションを防ぐため、`"`と改行文字は削除されます。
///
/// | 入力 | Standard | Odoo |
/// | --- | --- | --- |
/// | `produtos.xlsx` | `produtos.csv` | `produtos_odoo.csv` |
/// | `a.b.xlsx` | `a.b.csv` | `a.b_odoo.csv` |
/// | `.hidden` | `.hidden.csv` | `.hidden_odoo.csv` |
/// | なし | `export.csv` | `export_odoo.csv` |
pub fn output_filename(upload_name: Option<&str>, profile: ExportProfile) -> String {
    let name = upload_name
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_UPLOAD_NAME);

    format!("{}{}", strip_extension(name), profile.file_suffix())
        .chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n'))
        .collect()
}

fn strip_extension(name: &str) -> &str {
    let base_start = name.rfind('/').map_or(0, |i| i + 1);
    let base = &name[base_start..];

    // 先頭のドットは拡張子の区切りとみなさない（`.hidden`）
    let leading_dots = base.len() - base.trim_start_matches('.').len();
    match base[leading_dots..].rfind('.') {
        Some(dot) => &name[..base_start + leading_dots + dot],
        None => name,
    }
}

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: BIND_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// 環境変数`PORT`から設定を読み込む
    pub fn from_env() -> Result<Self, XlsxToCsvError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の変数ソースから設定を読み込む
    ///
    /// # 戻り値
    ///
    /// * `Err(XlsxToCsvError::Config)` - `PORT`がポート番号として解析できない場合
    pub fn from_lookup<F>(lookup: F) -> Result<Self, XlsxToCsvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|e| {
                XlsxToCsvError::Config(format!("Invalid PORT value {:?}: {}", value, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: BIND_HOST.to_string(),
            port,
        })
    }

    /// `host:port`形式のアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
