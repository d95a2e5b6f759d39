//! Output module for presenting operation results
//!
//! This module handles:
//! - The serde-tagged [`Record`] envelope used for JSON output
//! - Human-readable summary lines for each operation
//! - Markdown rendering of results

mod markdown;

pub use markdown::format_markdown;

use crate::extract::{Article, Category, LifeEvent, LifeEventDetail, SearchResult};
use crate::site::SiteId;
use serde::Serialize;

/// One extracted record, tagged with its type when serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    SearchResult(SearchResult),
    Article(Article),
    Category(Category),
    LifeEvent(LifeEvent),
    LifeEventDetail(LifeEventDetail),
}

impl From<SearchResult> for Record {
    fn from(value: SearchResult) -> Self {
        Self::SearchResult(value)
    }
}

impl From<Article> for Record {
    fn from(value: Article) -> Self {
        Self::Article(value)
    }
}

impl From<Category> for Record {
    fn from(value: Category) -> Self {
        Self::Category(value)
    }
}

impl From<LifeEvent> for Record {
    fn from(value: LifeEvent) -> Self {
        Self::LifeEvent(value)
    }
}

impl From<LifeEventDetail> for Record {
    fn from(value: LifeEventDetail) -> Self {
        Self::LifeEventDetail(value)
    }
}

/// The result of one operation, ready to be printed
#[derive(Debug, Clone)]
pub struct Report {
    pub site: SiteId,
    pub operation: Operation,
    pub records: Vec<Record>,
}

/// Which operation produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Document,
    Categories,
    LifeEvents,
    LifeEventDetail,
}

impl Report {
    pub fn new<R: Into<Record>>(
        site: SiteId,
        operation: Operation,
        records: impl IntoIterator<Item = R>,
    ) -> Self {
        Self {
            site,
            operation,
            records: records.into_iter().map(Into::into).collect(),
        }
    }

    /// One-line description of the result
    pub fn summary(&self) -> String {
        let count = self.records.len();
        match (self.operation, self.site) {
            (Operation::Search, SiteId::ServicePublic) => format!("Found {count} procedures"),
            (Operation::Search, SiteId::Impots) => format!("Found {count} tax documents"),
            (Operation::Categories, SiteId::ServicePublic) => format!("Found {count} categories"),
            (Operation::Categories, SiteId::Impots) => format!("Found {count} tax categories"),
            (Operation::LifeEvents, _) => format!("Found {count} life events"),
            (Operation::Document, site) => {
                let label = match site {
                    SiteId::ServicePublic => "article",
                    SiteId::Impots => "tax document",
                };
                format!("Retrieved {}: {}", label, self.first_title())
            }
            (Operation::LifeEventDetail, _) => {
                format!("Retrieved life event: {}", self.first_title())
            }
        }
    }

    /// Pretty-printed JSON payload
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self.operation {
            Operation::Document | Operation::LifeEventDetail if self.records.len() == 1 => {
                serde_json::to_string_pretty(&self.records[0])
            }
            _ => serde_json::to_string_pretty(&self.records),
        }
    }

    fn first_title(&self) -> &str {
        match self.records.first() {
            Some(Record::Article(article)) => &article.title,
            Some(Record::LifeEventDetail(detail)) => &detail.title,
            _ => "",
        }
    }
}
