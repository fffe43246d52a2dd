use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

use log::{info, warn};
use serde_json::Value;

use super::select;
use super::titles::Lesson;

/// Optional illustration collaborator. Returning `None` never fails the
/// run; the day's record simply carries no image.
pub(crate) trait ImageGenerator {
    fn generate(&self, subject: &str, title: &str, content: &str) -> Option<String>;
}

pub(crate) struct GitHubModelsImageGenerator {
    token: String,
}

impl GitHubModelsImageGenerator {
    const ENDPOINT: &'static str = "https://models.inference.ai.azure.com/images/generations";

    pub(crate) fn new(token: String) -> Self {
        Self { token }
    }

    fn style_for_subject(subject: &str) -> &'static str {
        match subject {
            "自然" => "scientific illustration, educational diagram, nature",
            "國文" => "traditional Chinese calligraphy, literature, classical art",
            "歷史" => "historical illustration, ancient artifacts, timeline",
            "地理" => "geographical map, landscape, cultural landmarks",
            "公民" => "civic education, society, democratic concepts",
            _ => "educational illustration",
        }
    }

    fn build_prompt(subject: &str, title: &str, content: &str) -> String {
        // Keep the prompt bounded even if content grows past the title.
        let summary: String = content.chars().take(200).collect();
        format!(
            "Create an educational illustration for {subject} lesson titled '{title}'. \
             Content focus: {summary}. Style: {}. Requirements: suitable for 7th grade \
             students, clear and informative, culturally appropriate for Taiwan education",
            Self::style_for_subject(subject)
        )
    }
}

impl ImageGenerator for GitHubModelsImageGenerator {
    fn generate(&self, subject: &str, title: &str, content: &str) -> Option<String> {
        let body = serde_json::json!({
            "model": "dall-e-3",
            "prompt": Self::build_prompt(subject, title, content),
            "size": "1024x1024",
            "quality": "standard",
            "style": "natural",
        });

        let response = ureq::post(Self::ENDPOINT)
            .set("Authorization", &format!("Bearer {}", self.token))
            .timeout(Duration::from_secs(60))
            .send_json(body);
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!("image generation failed for {subject} - {title}: {err}");
                return None;
            }
        };

        let parsed: Value = response.into_json().ok()?;
        let url = parsed.pointer("/data/0/url")?.as_str()?.to_string();
        info!("generated image for {subject} - {title}");
        Some(url)
    }
}

/// Stand-in used when no token is configured. URLs are stable per input
/// so repeated runs for the same lesson agree.
pub(crate) struct MockImageGenerator;

impl ImageGenerator for MockImageGenerator {
    fn generate(&self, subject: &str, title: &str, _content: &str) -> Option<String> {
        let mut hasher = DefaultHasher::new();
        subject.hash(&mut hasher);
        title.hash(&mut hasher);
        Some(format!(
            "https://example.com/mock-images/{:016x}.png",
            hasher.finish()
        ))
    }
}

pub(crate) fn enhance_lesson(mut lesson: Lesson, generator: &dyn ImageGenerator) -> Lesson {
    match generator.generate(&lesson.subject, &lesson.title, &lesson.content) {
        Some(url) => {
            lesson.image_url = Some(url);
            lesson.image_generated_at = Some(select::taipei_now().to_rfc3339());
        }
        None => warn!("no image for {} - {}", lesson.subject, lesson.title),
    }
    lesson
}
