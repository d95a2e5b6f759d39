//! Extraction pipeline
//!
//! Each page type has a synchronous extractor that walks a parsed document with the
//! site's rule set and pushes zero or more records into the call's
//! [`CrawlSession`](crate::crawler::CrawlSession). Rule failures (an unparsable selector
//! or pattern) are recorded in the session and the remaining rules keep running.

mod article;
mod life_events;
mod navigation;
mod search;
mod text;

pub use article::{extract_article, extract_life_event_detail};
pub use life_events::extract_life_events;
pub use navigation::extract_categories;
pub use search::{clamp_limit, extract_search_results, DEFAULT_LIMIT, MAX_LIMIT};
pub use text::{is_boilerplate, keep_fragment, resolve_link, MIN_FRAGMENT_LEN};

use crate::crawler::CrawlSession;
use crate::VosDroitsError;
use regex::Regex;
use scraper::Selector;
use serde::Serialize;

/// A search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Document type derived from the breadcrumb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArticleKind {
    #[serde(rename = "Formulaire")]
    Form,
    #[serde(rename = "Question-Réponse")]
    Question,
    #[serde(rename = "Article")]
    Article,
}

impl ArticleKind {
    pub fn from_breadcrumb(breadcrumb: &str) -> Self {
        if breadcrumb.contains("Formulaire") {
            Self::Form
        } else if breadcrumb.contains("Question") {
            Self::Question
        } else {
            Self::Article
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Form => "Formulaire",
            Self::Question => "Question-Réponse",
            Self::Article => "Article",
        }
    }
}

/// A single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ArticleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeEvent {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// A life-event guide split into an introduction and titled sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeEventDetail {
    pub title: String,
    pub url: String,
    pub introduction: String,
    pub sections: Vec<Section>,
}

/// Compiles a rule selector, recording the failure in the session
pub(crate) fn compile_selector<T>(raw: &str, session: &mut CrawlSession<T>) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Extraction rule '{}' does not compile: {:?}", raw, e);
            session.record_error(VosDroitsError::Selector {
                selector: raw.to_string(),
                message: format!("{e:?}"),
            });
            None
        }
    }
}

/// Compiles a rule pattern, recording the failure in the session
pub(crate) fn compile_pattern<T>(raw: &str, session: &mut CrawlSession<T>) -> Option<Regex> {
    match Regex::new(raw) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!("Extraction pattern '{}' does not compile: {}", raw, e);
            session.record_error(VosDroitsError::Selector {
                selector: raw.to_string(),
                message: e.to_string(),
            });
            None
        }
    }
}
