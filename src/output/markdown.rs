//! Markdown rendering of reports
//!
//! Produces a document with a heading per report and one block per record.

use crate::output::{Record, Report};

/// Formats a report as markdown
pub fn format_markdown(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.summary()));

    for record in &report.records {
        match record {
            Record::SearchResult(result) => {
                md.push_str(&format!("## [{}]({})\n\n", result.title, result.url));
                if let Some(kind) = &result.kind {
                    md.push_str(&format!("- **Type**: {}\n", kind));
                }
                if let Some(date) = &result.date {
                    md.push_str(&format!("- **Date**: {}\n", date));
                }
                if !result.description.is_empty() {
                    md.push_str(&format!("\n{}\n", result.description));
                }
                md.push('\n');
            }
            Record::Article(article) => {
                md.push_str(&format!("## {}\n\n", article.title));
                md.push_str(&format!("- **URL**: {}\n", article.url));
                if let Some(kind) = article.kind {
                    md.push_str(&format!("- **Type**: {}\n", kind.label()));
                }
                if let Some(description) = &article.description {
                    md.push_str(&format!("- **Description**: {}\n", description));
                }
                md.push_str(&format!("\n{}\n\n", article.content));
            }
            Record::Category(category) => {
                match &category.url {
                    Some(url) => md.push_str(&format!("- [{}]({})", category.name, url)),
                    None => md.push_str(&format!("- {}", category.name)),
                }
                md.push_str(&format!(": {}\n", category.description));
            }
            Record::LifeEvent(event) => {
                md.push_str(&format!("- [{}]({})\n", event.title, event.url));
            }
            Record::LifeEventDetail(detail) => {
                md.push_str(&format!("## {}\n\n", detail.title));
                md.push_str(&format!("- **URL**: {}\n\n", detail.url));
                if !detail.introduction.is_empty() {
                    md.push_str(&format!("{}\n\n", detail.introduction));
                }
                for section in &detail.sections {
                    md.push_str(&format!("### {}\n\n{}\n\n", section.title, section.content));
                }
            }
        }
    }

    md
}
