use log::{info, warn};
use scraper::{Html, Selector};
use serde::Serialize;

use crate::http::PageSource;

use super::subjects::{SUBJECTS, Subject, TITLE_SELECTOR, course_url};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Lesson {
    pub(crate) id: String,
    pub(crate) subject: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) image_generated_at: Option<String>,
}

impl Lesson {
    pub(crate) fn new(subject: &str, index: usize, title: &str, source_url: &str) -> Self {
        Self {
            id: format!("{subject}_{index}"),
            subject: subject.to_string(),
            title: title.to_string(),
            // Detail extraction is not wired up; the title doubles as content.
            content: title.to_string(),
            source_url: source_url.to_string(),
            image_url: None,
            image_generated_at: None,
        }
    }
}

/// Which branch of the title source produced the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    Live,
    Fallback,
}

/// Scrapes every configured subject listing; a subject whose fetch fails
/// is skipped. Only when the whole pass yields nothing does the embedded
/// list take over, so the returned pool is never empty.
pub(crate) fn gather_lessons(source: &dyn PageSource) -> (Vec<Lesson>, Origin) {
    let mut lessons = Vec::new();
    for subject in SUBJECTS {
        info!("fetching subject listing: {}", subject.name);
        match source.fetch_page(subject.url) {
            Ok(html) => {
                let found = extract_lessons(subject, &html);
                info!("{}: {} lessons", subject.name, found.len());
                lessons.extend(found);
            }
            Err(err) => warn!("fetch failed for {}: {err}", subject.name),
        }
    }

    if lessons.is_empty() {
        (fallback_lessons(), Origin::Fallback)
    } else {
        (lessons, Origin::Live)
    }
}

pub(crate) fn extract_lessons(subject: &Subject, html: &str) -> Vec<Lesson> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse(TITLE_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .enumerate()
        .filter(|(_, text)| !text.is_empty() && subject.filter.matches(text))
        .map(|(index, text)| Lesson::new(subject.name, index, &text, subject.url))
        .collect()
}

// Baked-in pool used when none of the live listings can be reached.
// Must stay non-empty; selection divides by its length.
const FALLBACK_TITLES: &[(&str, &str)] = &[
    ("國文", "國文 第八課 記承天寺夜遊"),
    ("國文", "國文 第九課 桃花源記"),
    ("國文", "國文 第十課 木蘭詩"),
    ("自然", "【1-1】生物圈與生物多樣性"),
    ("自然", "【2-1】細胞的構造與功能"),
    ("歷史", "【1-1】史前臺灣與原住民族"),
    ("地理", "【1-1】臺灣的位置與範圍"),
    ("公民", "【1-1】自我的成長與準備"),
];

pub(crate) fn fallback_lessons() -> Vec<Lesson> {
    FALLBACK_TITLES
        .iter()
        .enumerate()
        .map(|(index, (subject, title))| Lesson::new(subject, index, title, course_url(subject)))
        .collect()
}
