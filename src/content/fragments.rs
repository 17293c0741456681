//! List fragments rendered into content containers

use crate::config::Labels;
use crate::helpers::{html_escape, locale_date, paragraph};
use crate::model::{GlossaryTerm, StoryDigest};

/// Service shown on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES: [Service; 4] = [
    Service {
        id: "video",
        title: "Video production",
        description: "Video content from script to final cut",
    },
    Service {
        id: "design",
        title: "Design",
        description: "Graphic design and brand identity",
    },
    Service {
        id: "engineering",
        title: "Engineering",
        description: "CAD and 3D design",
    },
    Service {
        id: "automation",
        title: "Automation",
        description: "Process automation",
    },
];

pub fn loading_html(labels: &Labels) -> String {
    format!(r#"<p class="loading">{}</p>"#, html_escape(&labels.loading))
}

pub fn error_html(message: &str) -> String {
    format!(r#"<p class="error">{}</p>"#, html_escape(message))
}

/// Glossary items, at most `limit`; an error message when there are none
pub fn glossary_html(terms: &[GlossaryTerm], limit: usize, labels: &Labels) -> String {
    if terms.is_empty() {
        return error_html(&labels.kb_not_found);
    }

    terms
        .iter()
        .take(limit)
        .map(|term| {
            format!(
                concat!(
                    r#"<div class="kb-item">"#,
                    r##"<h4><a href="#/kb/articles/{}">{}</a></h4>"##,
                    "<p>{}</p>",
                    "</div>"
                ),
                html_escape(&term.slug),
                html_escape(&term.title),
                html_escape(term.lite_summary.as_deref().unwrap_or_default()),
            )
        })
        .collect()
}

/// Story items with episode count and a locale-formatted date
pub fn stories_html(
    stories: &[StoryDigest],
    limit: usize,
    labels: &Labels,
    locale: &str,
) -> String {
    if stories.is_empty() {
        return error_html(&labels.stories_not_found);
    }

    stories
        .iter()
        .take(limit)
        .map(|story| {
            let date = story
                .generated_at
                .as_deref()
                .and_then(|d| locale_date(d, locale));
            format!(
                concat!(
                    r#"<div class="story-item">"#,
                    r##"<h4><a href="#/stories/{}">{}</a></h4>"##,
                    "<p>{}: {}</p>",
                    "{}",
                    "</div>"
                ),
                html_escape(&story.slug),
                html_escape(&story.title),
                html_escape(&labels.episodes),
                story.episodes.len(),
                paragraph(Some("story-date"), date.as_deref()),
            )
        })
        .collect()
}

pub fn services_html(labels: &Labels) -> String {
    SERVICES
        .iter()
        .map(|service| {
            format!(
                concat!(
                    r#"<div class="service-card">"#,
                    "<h3>{}</h3>",
                    "<p>{}</p>",
                    r##"<a href="#/services/{}" class="service-link">{}</a>"##,
                    "</div>"
                ),
                html_escape(service.title),
                html_escape(service.description),
                html_escape(service.id),
                html_escape(&labels.read_more),
            )
        })
        .collect()
}

pub fn portfolio_html(labels: &Labels) -> String {
    format!(
        concat!(
            r#"<div class="portfolio-preview-text">"#,
            "<p>{}</p>",
            r##"<a href="#/portfolio" class="portfolio-link">{}</a>"##,
            "</div>"
        ),
        html_escape(&labels.portfolio_placeholder),
        html_escape(&labels.portfolio_link),
    )
}
