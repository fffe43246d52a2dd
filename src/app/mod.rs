mod emit;
mod image;
mod link;
mod select;
mod subjects;
mod titles;


use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use crate::cli::{Cli, Command};
use crate::http::HttpPageSource;
use crate::paths;

use self::image::{GitHubModelsImageGenerator, ImageGenerator, MockImageGenerator};
use self::titles::{Lesson, Origin};

const SCRAPE_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const SCRAPE_READ_TIMEOUT: Duration = Duration::from_secs(15);
const REACHABILITY_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const REACHABILITY_READ_TIMEOUT: Duration = Duration::from_secs(8);

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Run) | None => run_daily(),
        Some(Command::Demo) => run_demo(),
        Some(Command::Show) => run_show(),
    }
}

fn run_daily() -> Result<()> {
    let scraper = HttpPageSource {
        connect_timeout: SCRAPE_CONNECT_TIMEOUT,
        read_timeout: SCRAPE_READ_TIMEOUT,
    };
    let (lessons, origin) = titles::gather_lessons(&scraper);
    if origin == Origin::Fallback {
        warn!("live fetch yielded no lessons, using the embedded list");
    }

    let today = select::taipei_today();
    let lesson = pick_lesson(&lessons, &today)?;
    info!("today's lesson: {} - {}", lesson.subject, lesson.title);

    let generator = image_generator_from_env();
    let lesson = image::enhance_lesson(lesson, generator.as_ref());

    let link = link::build_search_link(&lesson.title);
    let checker = HttpPageSource {
        connect_timeout: REACHABILITY_CONNECT_TIMEOUT,
        read_timeout: REACHABILITY_READ_TIMEOUT,
    };
    let out_dir = paths::docs_dir();
    let page = emit::emit_page(&out_dir, &today.date_key, &lesson.title, &link, &checker)?;
    info!("wrote {}", page.display());
    let record = emit::emit_record(&out_dir, &today.date_key, &lesson)?;
    info!("wrote {}", record.display());
    Ok(())
}

/// Offline walkthrough of the pipeline: embedded lesson pool, mock image
/// generator, no network at any step.
fn run_demo() -> Result<()> {
    let lessons = titles::fallback_lessons();
    let today = select::taipei_today();
    let lesson = pick_lesson(&lessons, &today)?;
    info!("today's lesson: {} - {}", lesson.subject, lesson.title);

    let lesson = image::enhance_lesson(lesson, &MockImageGenerator);
    let link = link::build_search_link(&lesson.title);

    let out_dir = paths::docs_dir();
    let page = emit::emit_redirect(&out_dir, &today.date_key, &lesson.title, &link)?;
    info!("wrote {}", page.display());
    let record = emit::emit_record(&out_dir, &today.date_key, &lesson)?;
    info!("wrote {}", record.display());
    Ok(())
}

fn run_show() -> Result<()> {
    let scraper = HttpPageSource {
        connect_timeout: SCRAPE_CONNECT_TIMEOUT,
        read_timeout: SCRAPE_READ_TIMEOUT,
    };
    let (lessons, origin) = titles::gather_lessons(&scraper);
    let today = select::taipei_today();
    let lesson = pick_lesson(&lessons, &today)?;
    let link = link::build_search_link(&lesson.title);

    let pool_label = match origin {
        Origin::Live => "live listings",
        Origin::Fallback => "embedded fallback",
    };
    println!("Date (Asia/Taipei): {}", today.date_key);
    println!("Lesson pool: {} entries ({pool_label})", lessons.len());
    println!("Selected: {} - {}", lesson.subject, lesson.title);
    println!("Link: {link}");
    Ok(())
}

fn pick_lesson(lessons: &[Lesson], today: &select::CivilDay) -> Result<Lesson> {
    let index = select::select_index(lessons.len(), today.ordinal_day)?;
    Ok(lessons[index].clone())
}

fn image_generator_from_env() -> Box<dyn ImageGenerator> {
    match std::env::var("GITHUB_TOKEN") {
        Ok(token) if !token.trim().is_empty() => {
            info!("using GitHub Models image generator");
            Box::new(GitHubModelsImageGenerator::new(token))
        }
        _ => {
            warn!("GITHUB_TOKEN not set, using mock image generator");
            Box::new(MockImageGenerator)
        }
    }
}
