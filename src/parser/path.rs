//! OPC part path helpers

/// パーツに対応するリレーションシップファイルのパス
///
/// 例: `xl/drawings/drawing1.xml` -> `xl/drawings/_rels/drawing1.xml.rels`
pub(crate) fn rels_for_part(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file_name)) => format!("{dir}/_rels/{file_name}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// リレーションシップのターゲットを、ソースパーツからの相対パスとして解決
///
/// 例: (`xl/drawings/drawing1.xml`, `../media/image1.png`) -> `xl/media/image1.png`
pub(crate) fn resolve_target(source_part: &str, target: &str) -> String {
    // URIフラグメントはパーツ名に含まれない
    let target = target.split('#').next().unwrap_or(target);
    if target.is_empty() {
        return normalize(source_part);
    }
    if let Some(target) = target.strip_prefix('/') {
        return normalize(target);
    }

    let base_dir = source_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    normalize(&format!("{base_dir}/{target}"))
}

fn normalize(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}
