use std::sync::LazyLock;

use regex::Regex;

/// All five course listings render chapter titles the same way.
pub(crate) const TITLE_SELECTOR: &str = "h3.chapter-name";

// 自然/歷史/地理/公民 tag chapters as 【unit-section】; 國文 uses free-form
// 【…】 tags like 【第一課】. Anything untagged is navigation chrome.
static UNIT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^【\d+-\d+】").expect("unit number pattern"));
static BRACKET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【[^】]+】").expect("bracket tag pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TitleFilter {
    UnitNumber,
    BracketTag,
}

impl TitleFilter {
    pub(crate) fn matches(self, text: &str) -> bool {
        match self {
            TitleFilter::UnitNumber => UNIT_NUMBER.is_match(text),
            TitleFilter::BracketTag => BRACKET_TAG.is_match(text),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Subject {
    pub(crate) name: &'static str,
    pub(crate) url: &'static str,
    pub(crate) filter: TitleFilter,
}

pub(crate) const SUBJECTS: &[Subject] = &[
    Subject {
        name: "自然",
        url: "https://www.learnmode.net/course/638520/content",
        filter: TitleFilter::UnitNumber,
    },
    Subject {
        name: "國文",
        url: "https://www.learnmode.net/course/638508/content",
        filter: TitleFilter::BracketTag,
    },
    Subject {
        name: "歷史",
        url: "https://www.learnmode.net/course/638740/content",
        filter: TitleFilter::UnitNumber,
    },
    Subject {
        name: "地理",
        url: "https://www.learnmode.net/course/638739/content",
        filter: TitleFilter::UnitNumber,
    },
    Subject {
        name: "公民",
        url: "https://www.learnmode.net/course/638741/content",
        filter: TitleFilter::UnitNumber,
    },
];

pub(crate) fn course_url(subject_name: &str) -> &'static str {
    SUBJECTS
        .iter()
        .find(|subject| subject.name == subject_name)
        .map(|subject| subject.url)
        .unwrap_or("https://www.learnmode.net")
}
