use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

const SEARCH_BASE: &str = "https://www.perplexity.ai/search?q=";

// Study prompt wrapped around the title; the trailing space is part of
// the template.
const PROMPT_PREFIX: &str =
    "請根據附檔的課文教學重點格式，提供一篇詳細的課文學習教材，內容盡可能的詳細，題目如下: ";

pub(crate) fn build_prompt(title: &str) -> String {
    format!("{PROMPT_PREFIX}{title}")
}

/// Percent-encodes the study prompt into the search URL. Encoding works
/// on UTF-8 bytes, so CJK titles survive the round trip intact.
pub(crate) fn build_search_link(title: &str) -> String {
    let prompt = build_prompt(title);
    let encoded = utf8_percent_encode(&prompt, NON_ALPHANUMERIC);
    format!("{SEARCH_BASE}{encoded}")
}
