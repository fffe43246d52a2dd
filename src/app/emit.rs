use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};
use serde::Serialize;

use crate::http::PageSource;
use crate::paths;

use super::select;
use super::titles::Lesson;

#[derive(Debug, Serialize)]
struct DailyRecord<'a> {
    date: &'a str,
    lessons: Vec<&'a Lesson>,
    generated_at: String,
}

/// Minimal self-contained page: immediate refresh to `link`, plus a
/// visible anchor for clients that suppress automatic redirects.
pub(crate) fn render_redirect_page(title: &str, link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="0;url={link}">
<title>跳轉中...</title>
</head>
<body>
如果沒有自動跳轉，請點擊 <a href="{link}">{title}</a>
</body>
</html>
"#
    )
}

pub(crate) fn render_record(
    date_key: &str,
    lesson: &Lesson,
    generated_at: String,
) -> Result<String> {
    let record = DailyRecord {
        date: date_key,
        lessons: vec![lesson],
        generated_at,
    };
    Ok(serde_json::to_string_pretty(&record)?)
}

/// Writes the day's page. Persists the target content verbatim when the
/// link is reachable, otherwise falls back to the redirect page so the
/// artifact exists even with the upstream service down.
pub(crate) fn emit_page(
    out_dir: &Path,
    date_key: &str,
    title: &str,
    link: &str,
    source: &dyn PageSource,
) -> Result<PathBuf> {
    match source.fetch_page(link) {
        Ok(body) => {
            let path = paths::page_path(out_dir, date_key);
            paths::write_atomic(&path, &body)?;
            Ok(path)
        }
        Err(err) => {
            warn!("target not reachable, emitting redirect page instead: {err}");
            emit_redirect(out_dir, date_key, title, link)
        }
    }
}

pub(crate) fn emit_redirect(
    out_dir: &Path,
    date_key: &str,
    title: &str,
    link: &str,
) -> Result<PathBuf> {
    let path = paths::page_path(out_dir, date_key);
    paths::write_atomic(&path, &render_redirect_page(title, link))?;
    Ok(path)
}

pub(crate) fn emit_record(out_dir: &Path, date_key: &str, lesson: &Lesson) -> Result<PathBuf> {
    let path = paths::record_path(out_dir, date_key);
    let json = render_record(date_key, lesson, select::taipei_now().to_rfc3339())?;
    paths::write_atomic(&path, &json)?;
    info!("recorded {} - {}", lesson.subject, lesson.title);
    Ok(path)
}
