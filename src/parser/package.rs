//! XLSX Package Module
//!
//! XLSXパッケージ（ZIPアーカイブ）内のXMLを直接解析し、calamineでは取得できない情報を抽出するモジュール。
//! アクティブシートの判定と、描画パーツに固定された画像の取り出しを提供します。

use std::io::{Read, Seek};

use log::{debug, warn};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::XlsxToCsvError;
use crate::parser::path::{rels_for_part, resolve_target};
use crate::security::SecurityConfig;
use crate::types::{CellCoord, ImageAnchor};

const DEFAULT_WORKBOOK_PART: &str = "xl/workbook.xml";

/// リレーションシップ（`<Relationship Id=".." Type=".." Target=".."/>`）
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    /// Transitional/Strict両方の名前空間に対応するため、型URIの末尾で比較する
    fn has_type(&self, suffix: &str) -> bool {
        self.rel_type.ends_with(suffix)
    }
}

/// workbook.xmlで宣言されたシート
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    /// ワークシートXMLのパーツ名（例: `xl/worksheets/sheet1.xml`）
    part: Option<String>,
}

/// 描画パーツ内のアンカー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorKind {
    /// `oneCellAnchor` / `twoCellAnchor`（`from`セルを持つ）
    Cell,
    /// `absoluteAnchor`（セルに固定されていない）
    Absolute,
}

/// 描画パーツから読み取ったアンカー（解決前）
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawAnchor {
    kind: AnchorKind,
    from_row: Option<u32>,
    from_col: Option<u32>,
    /// `<a:blip r:embed="rId1"/>`のリレーションシップID
    embed: Option<String>,
}

impl RawAnchor {
    fn new(kind: AnchorKind) -> Self {
        Self {
            kind,
            from_row: None,
            from_col: None,
            embed: None,
        }
    }

    /// アンカーセルと画像のリレーションシップIDを取得
    fn resolve(&self) -> Result<(CellCoord, &str), String> {
        if self.kind == AnchorKind::Absolute {
            return Err("absolute anchor has no cell".to_string());
        }
        let embed = self
            .embed
            .as_deref()
            .ok_or_else(|| "anchor does not reference a picture".to_string())?;
        match (self.from_row, self.from_col) {
            (Some(row), Some(col)) => Ok((CellCoord::new(row, col), embed)),
            _ => Err("anchor has no readable 'from' cell".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FromField {
    Col,
    Row,
}

/// XLSXパッケージリーダー
///
/// ZIPアーカイブを開いた時点でセキュリティ制限を検査し、workbook.xmlからシート一覧と
/// アクティブシートを読み取ります。
pub(crate) struct XlsxPackage<R: Read + Seek> {
    archive: ZipArchive<R>,
    security: SecurityConfig,
    sheets: Vec<SheetEntry>,
    active_tab: usize,
}

impl<R: Read + Seek> XlsxPackage<R> {
    /// パッケージを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(XlsxPackage)` - 開くことに成功した場合
    /// * `Err(XlsxToCsvError::Zip)` - ZIPアーカイブとして読めない、またはworkbook.xmlがない場合
    /// * `Err(XlsxToCsvError::SecurityViolation)` - セキュリティ制限に違反した場合
    pub fn open(reader: R) -> Result<Self, XlsxToCsvError> {
        let security = SecurityConfig::default();
        let mut archive = ZipArchive::new(reader)?;
        security.check_archive(&mut archive)?;

        let mut package = Self {
            archive,
            security,
            sheets: Vec::new(),
            active_tab: 0,
        };

        let workbook_part = package.workbook_part()?;
        let workbook_xml = package.read_part(&workbook_part)?.ok_or_else(|| {
            XlsxToCsvError::Zip(format!("missing workbook part '{}'", workbook_part))
        })?;
        let (declared, active_tab) = parse_workbook(&workbook_xml)?;
        let rels = package.read_relationships(&rels_for_part(&workbook_part))?;

        package.sheets = declared
            .into_iter()
            .map(|(name, rel_id)| {
                let part = rel_id
                    .and_then(|rel_id| rels.iter().find(|rel| rel.id == rel_id))
                    .map(|rel| resolve_target(&workbook_part, &rel.target));
                SheetEntry { name, part }
            })
            .collect();
        package.active_tab = active_tab;

        Ok(package)
    }

    /// アクティブシート名
    ///
    /// `activeTab`が範囲外の場合は先頭シートを返します。シートがない場合は`None`。
    pub fn active_sheet_name(&self) -> Option<&str> {
        self.sheets
            .get(self.active_tab)
            .or_else(|| self.sheets.first())
            .map(|s| s.name.as_str())
    }

    /// シートに固定された画像を、描画パーツ内の出現順に取得
    ///
    /// 解決できないアンカーや読めない画像はスキップします（`warn`ログを出力）。
    /// 描画パーツ自体が壊れている場合も、そのパーツだけをスキップします。
    pub fn anchored_images(
        &mut self,
        sheet_name: &str,
    ) -> Result<Vec<ImageAnchor>, XlsxToCsvError> {
        let sheet_part = match self
            .sheets
            .iter()
            .find(|s| s.name == sheet_name)
            .and_then(|s| s.part.clone())
        {
            Some(part) => part,
            None => return Ok(Vec::new()),
        };

        let drawing_parts: Vec<String> = self
            .read_relationships(&rels_for_part(&sheet_part))?
            .iter()
            .filter(|rel| rel.has_type("/drawing"))
            .map(|rel| resolve_target(&sheet_part, &rel.target))
            .collect();

        let mut images = Vec::new();
        for drawing_part in drawing_parts {
            match self.read_drawing_images(&drawing_part) {
                Ok(mut found) => images.append(&mut found),
                Err(e) => warn!("skipping drawing part '{}': {}", drawing_part, e),
            }
        }

        debug!(
            "found {} anchored image(s) on sheet '{}'",
            images.len(),
            sheet_name
        );
        Ok(images)
    }

    /// 1つの描画パーツから画像を取り出す
    fn read_drawing_images(
        &mut self,
        drawing_part: &str,
    ) -> Result<Vec<ImageAnchor>, XlsxToCsvError> {
        let xml = self
            .read_part(drawing_part)?
            .ok_or_else(|| XlsxToCsvError::Zip(format!("missing part '{}'", drawing_part)))?;
        let anchors = parse_drawing(&xml)?;
        let rels = self.read_relationships(&rels_for_part(drawing_part))?;

        let mut images = Vec::new();
        for anchor in &anchors {
            let (cell, embed) = match anchor.resolve() {
                Ok(resolved) => resolved,
                Err(reason) => {
                    warn!("skipping anchor in '{}': {}", drawing_part, reason);
                    continue;
                }
            };

            let Some(rel) = rels.iter().find(|rel| rel.id == embed) else {
                warn!(
                    "skipping image at {}: relationship '{}' not found in '{}'",
                    cell, embed, drawing_part
                );
                continue;
            };

            let media_part = resolve_target(drawing_part, &rel.target);
            match self.read_part(&media_part) {
                Ok(Some(bytes)) => images.push(ImageAnchor::new(cell, bytes)),
                Ok(None) => warn!(
                    "skipping image at {}: part '{}' not found",
                    cell, media_part
                ),
                Err(e) => warn!("skipping image at {}: {}", cell, e),
            }
        }

        Ok(images)
    }

    /// ルートリレーションシップからworkbookパーツ名を取得
    fn workbook_part(&mut self) -> Result<String, XlsxToCsvError> {
        let rels = self.read_relationships("_rels/.rels")?;
        Ok(rels
            .iter()
            .find(|rel| rel.has_type("/officeDocument"))
            .map(|rel| resolve_target("", &rel.target))
            .unwrap_or_else(|| DEFAULT_WORKBOOK_PART.to_string()))
    }

    /// リレーションシップファイルを読む（存在しない場合は空）
    fn read_relationships(&mut self, rels_part: &str) -> Result<Vec<Relationship>, XlsxToCsvError> {
        match self.read_part(rels_part)? {
            Some(xml) => parse_relationships(&xml),
            None => Ok(Vec::new()),
        }
    }

    /// パーツの内容を読む（存在しない場合は`None`）
    fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>, XlsxToCsvError> {
        let file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // 宣言サイズと実サイズが異なるエントリに備え、読み込み量も制限する
        let limit = self.security.max_file_size;
        let mut content = Vec::new();
        file.take(limit + 1).read_to_end(&mut content)?;
        if content.len() as u64 > limit {
            return Err(XlsxToCsvError::SecurityViolation(format!(
                "File '{}' exceeds maximum size: {} bytes",
                name, limit
            )));
        }

        Ok(Some(content))
    }
}

fn xml_reader(xml: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    reader
}

fn attr_value(e: &BytesStart<'_>, local_name: &[u8]) -> Result<Option<String>, XlsxToCsvError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| XlsxToCsvError::Xml(format!("XML attribute error: {}", e)))?;
        if attr.key.local_name().as_ref() == local_name {
            let raw = std::str::from_utf8(&attr.value)?;
            let value = unescape(raw)
                .map_err(|e| XlsxToCsvError::Xml(format!("XML escape error: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// リレーションシップXMLを解析
fn parse_relationships(xml: &[u8]) -> Result<Vec<Relationship>, XlsxToCsvError> {
    let mut reader = xml_reader(xml);
    let mut buf = Vec::new();
    let mut relationships = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id")?;
                let target = attr_value(&e, b"Target")?;
                let rel_type = attr_value(&e, b"Type")?.unwrap_or_default();
                // IDまたはターゲットが欠落している場合はスキップ
                if let (Some(id), Some(target)) = (id, target) {
                    relationships.push(Relationship {
                        id,
                        rel_type,
                        target,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// workbook.xmlを解析
///
/// `<sheets>`内のシート名とリレーションシップID、最初の`<workbookView activeTab="..">`を返します。
#[allow(clippy::type_complexity)]
fn parse_workbook(xml: &[u8]) -> Result<(Vec<(String, Option<String>)>, usize), XlsxToCsvError> {
    let mut reader = xml_reader(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();
    let mut active_tab: Option<usize> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"workbookView" if active_tab.is_none() => {
                    active_tab = Some(match attr_value(&e, b"activeTab")? {
                        Some(tab) => tab.trim().parse()?,
                        None => 0,
                    });
                }
                b"sheet" => {
                    if let Some(name) = attr_value(&e, b"name")? {
                        // `r:id`のローカル名は`id`
                        let rel_id = attr_value(&e, b"id")?;
                        sheets.push((name, rel_id));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((sheets, active_tab.unwrap_or(0)))
}

/// 描画パーツ（`xl/drawings/drawing*.xml`）を解析
///
/// アンカーごとに、`from`セル（0始まり）と最初の`<a:blip r:embed>`を読み取ります。
fn parse_drawing(xml: &[u8]) -> Result<Vec<RawAnchor>, XlsxToCsvError> {
    let mut reader = xml_reader(xml);
    let mut buf = Vec::new();
    let mut anchors = Vec::new();
    let mut current: Option<RawAnchor> = None;
    let mut in_from = false;
    let mut field: Option<FromField> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"oneCellAnchor" | b"twoCellAnchor" => {
                    current = Some(RawAnchor::new(AnchorKind::Cell));
                }
                b"absoluteAnchor" => {
                    current = Some(RawAnchor::new(AnchorKind::Absolute));
                }
                b"from" if current.is_some() => in_from = true,
                b"col" if in_from => field = Some(FromField::Col),
                b"row" if in_from => field = Some(FromField::Row),
                b"blip" => record_embed(&e, current.as_mut())?,
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"blip" {
                    record_embed(&e, current.as_mut())?;
                }
            }
            Event::Text(text) => {
                if let (Some(field), Some(anchor)) = (field, current.as_mut()) {
                    let value = text.unescape()?.trim().parse::<u32>().ok();
                    match field {
                        FromField::Col => anchor.from_col = value,
                        FromField::Row => anchor.from_row = value,
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"col" | b"row" => field = None,
                b"from" => in_from = false,
                b"oneCellAnchor" | b"twoCellAnchor" | b"absoluteAnchor" => {
                    if let Some(anchor) = current.take() {
                        anchors.push(anchor);
                    }
                    in_from = false;
                    field = None;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(anchors)
}

fn record_embed(e: &BytesStart<'_>, anchor: Option<&mut RawAnchor>) -> Result<(), XlsxToCsvError> {
    if let Some(anchor) = anchor {
        if anchor.embed.is_none() {
            anchor.embed = attr_value(e, b"embed")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::{FileOptions, ZipWriter};

    const DRAWING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <xdr:twoCellAnchor editAs="oneCell">
    <xdr:from><xdr:col>2</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>1</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>
    <xdr:to><xdr:col>3</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>4</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>
    <xdr:pic>
      <xdr:nvPicPr><xdr:cNvPr id="2" name="Picture 1"/><xdr:cNvPicPr/></xdr:nvPicPr>
      <xdr:blipFill><a:blip r:embed="rId1"/><a:stretch><a:fillRect/></a:stretch></xdr:blipFill>
    </xdr:pic>
    <xdr:clientData/>
  </xdr:twoCellAnchor>
  <xdr:oneCellAnchor>
    <xdr:from><xdr:col>0</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>5</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>
    <xdr:ext cx="100" cy="100"/>
    <xdr:pic><xdr:blipFill><a:blip r:embed="rId2"><a:extLst/></a:blip></xdr:blipFill></xdr:pic>
    <xdr:clientData/>
  </xdr:oneCellAnchor>
  <xdr:absoluteAnchor>
    <xdr:pos x="0" y="0"/><xdr:ext cx="100" cy="100"/>
    <xdr:pic><xdr:blipFill><a:blip r:embed="rId1"/></xdr:blipFill></xdr:pic>
    <xdr:clientData/>
  </xdr:absoluteAnchor>
  <xdr:twoCellAnchor>
    <xdr:from><xdr:col>1</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>1</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>
    <xdr:to><xdr:col>2</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>2</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>
    <xdr:sp><xdr:nvSpPr><xdr:cNvPr id="3" name="Shape"/><xdr:cNvSpPr/></xdr:nvSpPr></xdr:sp>
    <xdr:clientData/>
  </xdr:twoCellAnchor>
</xdr:wsDr>"#;

    #[test]
    fn test_parse_drawing_anchors() {
        let anchors = parse_drawing(DRAWING_XML.as_bytes()).unwrap();
        assert_eq!(anchors.len(), 4);

        assert_eq!(
            anchors[0].resolve().unwrap(),
            (CellCoord::new(1, 2), "rId1")
        );
        assert_eq!(
            anchors[1].resolve().unwrap(),
            (CellCoord::new(5, 0), "rId2")
        );
        // absoluteAnchorはセルに固定されていない
        assert!(anchors[2].resolve().is_err());
        // 図形（画像なし）
        assert!(anchors[3].resolve().is_err());
    }

    #[test]
    fn test_parse_drawing_malformed_from() {
        let xml = r#"<xdr:wsDr xmlns:xdr="x" xmlns:a="a" xmlns:r="r"><xdr:oneCellAnchor><xdr:from><xdr:col>abc</xdr:col><xdr:row>1</xdr:row></xdr:from><xdr:pic><a:blip r:embed="rId1"/></xdr:pic></xdr:oneCellAnchor></xdr:wsDr>"#;
        let anchors = parse_drawing(xml.as_bytes()).unwrap();
        assert_eq!(anchors.len(), 1);
        assert!(anchors[0].resolve().is_err());
    }

    #[test]
    fn test_parse_relationships() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing" Target="../drawings/drawing1.xml"/>
  <Relationship Type="broken"/>
</Relationships>"#;
        let rels = parse_relationships(xml.as_bytes()).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].id, "rId1");
        assert_eq!(rels[0].target, "../media/image1.png");
        assert!(rels[1].has_type("/drawing"));
    }

    #[test]
    fn test_parse_workbook_sheets_and_active_tab() {
        let xml = r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <bookViews><workbookView xWindow="0" activeTab="1"/></bookViews>
  <sheets>
    <sheet name="Resumo" sheetId="1" r:id="rId1"/>
    <sheet name="Produtos &amp; Preços" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#;
        let (sheets, active_tab) = parse_workbook(xml.as_bytes()).unwrap();
        assert_eq!(active_tab, 1);
        assert_eq!(
            sheets,
            vec![
                ("Resumo".to_string(), Some("rId1".to_string())),
                ("Produtos & Preços".to_string(), Some("rId2".to_string())),
            ]
        );
    }

    #[test]
    fn test_attr_value_unescapes_entities() {
        let xml = r#"<sheet name="P&amp;D &lt;2024&gt;" r:id="rId1"/>"#;
        let mut reader = xml_reader(xml.as_bytes());
        let mut buf = Vec::new();
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Empty(e) => {
                assert_eq!(
                    attr_value(&e, b"name").unwrap(),
                    Some("P&D <2024>".to_string())
                );
                assert_eq!(attr_value(&e, b"id").unwrap(), Some("rId1".to_string()));
                assert_eq!(attr_value(&e, b"state").unwrap(), None);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_attr_value_rejects_broken_entity() {
        let xml = r#"<sheet name="P&amp D"/>"#;
        let mut reader = xml_reader(xml.as_bytes());
        let mut buf = Vec::new();
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Empty(e) => {
                assert!(matches!(attr_value(&e, b"name"), Err(XlsxToCsvError::Xml(_))));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_workbook_without_views() {
        let xml = r#"<workbook><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
        let (sheets, active_tab) = parse_workbook(xml.as_bytes()).unwrap();
        assert_eq!(active_tab, 0);
        assert_eq!(sheets.len(), 1);
    }

    fn build_package(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut data = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut data));
            for (name, content) in entries {
                zip.start_file(*name, FileOptions::default()).unwrap();
                zip.write_all(content).unwrap();
            }
            zip.finish().unwrap();
        }
        data
    }

    const ROOT_RELS: &[u8] = br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
    const WORKBOOK: &[u8] = br#"<workbook><sheets><sheet name="Dados" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
    const WORKBOOK_RELS: &[u8] = br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
    const SHEET_RELS: &[u8] = br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing" Target="../drawings/drawing1.xml"/></Relationships>"#;
    const DRAWING_RELS: &[u8] = br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/missing.png"/></Relationships>"#;

    #[test]
    fn test_package_anchored_images_skips_missing_media() {
        let data = build_package(&[
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", b"<worksheet/>"),
            ("xl/worksheets/_rels/sheet1.xml.rels", SHEET_RELS),
            ("xl/drawings/drawing1.xml", DRAWING_XML.as_bytes()),
            ("xl/drawings/_rels/drawing1.xml.rels", DRAWING_RELS),
            ("xl/media/image1.png", b"PNGDATA"),
        ]);

        let mut package = XlsxPackage::open(Cursor::new(data)).unwrap();
        assert_eq!(package.active_sheet_name(), Some("Dados"));

        let images = package.anchored_images("Dados").unwrap();
        // rId2（missing.png）はスキップされる
        assert_eq!(
            images,
            vec![ImageAnchor::new(CellCoord::new(1, 2), b"PNGDATA".to_vec())]
        );
        assert!(package.anchored_images("Outra").unwrap().is_empty());
    }

    #[test]
    fn test_package_skips_broken_drawing() {
        let data = build_package(&[
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", b"<worksheet/>"),
            ("xl/worksheets/_rels/sheet1.xml.rels", SHEET_RELS),
            ("xl/drawings/drawing1.xml", b"<xdr:wsDr><xdr:oneCellAnchor></xdr:wsDr>"),
        ]);

        let mut package = XlsxPackage::open(Cursor::new(data)).unwrap();
        assert!(package.anchored_images("Dados").unwrap().is_empty());
    }

    #[test]
    fn test_package_open_rejects_non_zip() {
        assert!(matches!(
            XlsxPackage::open(Cursor::new(b"plain text".to_vec())),
            Err(XlsxToCsvError::Zip(_))
        ));
    }
}
