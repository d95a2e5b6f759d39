//! Single document and life-event guide extraction

use super::text::{element_text, keep_fragment};
use super::{compile_selector, Article, ArticleKind, LifeEventDetail, Section};
use crate::crawler::CrawlSession;
use crate::site::{ArticleRules, LifeEventDetailRules};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts a single document
///
/// Pushes at most one record. Title and content may be empty; the caller decides
/// whether the record is usable.
pub fn extract_article(
    rules: &ArticleRules,
    document: &Html,
    url: &Url,
    session: &mut CrawlSession<Article>,
) {
    let title = extract_title(rules, document, session).unwrap_or_default();

    let description = rules
        .description_meta
        .and_then(|raw| compile_selector(raw, session))
        .and_then(|sel| {
            document
                .select(&sel)
                .filter_map(|meta| meta.value().attr("content"))
                .map(str::trim)
                .find(|content| !content.is_empty())
                .map(str::to_string)
        });

    let kind = rules
        .breadcrumb
        .and_then(|raw| compile_selector(raw, session))
        .and_then(|sel| document.select(&sel).next())
        .map(|breadcrumb| ArticleKind::from_breadcrumb(&element_text(&breadcrumb)));

    let content = extract_body(rules, document, session).join("\n\n");

    session.push(Article {
        title,
        content,
        url: url.to_string(),
        kind,
        description,
    });
}

/// Extracts a life-event guide: a leading introduction and titled sections
///
/// Every section heading inside the content container opens a new section; fragments
/// seen before the first heading belong to the introduction. Sections without a title
/// or without content are dropped.
pub fn extract_life_event_detail(
    article_rules: &ArticleRules,
    detail_rules: &LifeEventDetailRules,
    document: &Html,
    url: &Url,
    session: &mut CrawlSession<LifeEventDetail>,
) {
    let title = extract_title(article_rules, document, session).unwrap_or_default();

    let Some(container_sel) = compile_selector(article_rules.containers, session) else {
        return;
    };
    let Some(fragment_sel) = compile_selector(article_rules.fragments, session) else {
        return;
    };
    let Some(heading_sel) = compile_selector(detail_rules.section_heading, session) else {
        return;
    };
    let title_sel = compile_selector(article_rules.title, session);

    let (intro_nodes, mut introduction) = introduction_fragments(article_rules, document, session);
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    let container = document
        .select(&container_sel)
        .find(|c| c.select(&fragment_sel).any(|f| !element_text(&f).is_empty()));

    if let Some(container) = container {
        for fragment in container.select(&fragment_sel) {
            if intro_nodes.contains(&fragment) || is_title(&title_sel, &fragment) {
                continue;
            }

            let text = element_text(&fragment);
            if heading_sel.matches(&fragment) {
                if let Some(section) = current.take() {
                    sections.extend(close_section(section));
                }
                current = Some((text, Vec::new()));
                continue;
            }

            if !keep_fragment(&text) {
                continue;
            }
            match current.as_mut() {
                Some((_, parts)) => push_distinct(parts, text),
                None => push_distinct(&mut introduction, text),
            }
        }
    }

    if let Some(section) = current.take() {
        sections.extend(close_section(section));
    }

    session.push(LifeEventDetail {
        title,
        url: url.to_string(),
        introduction: introduction.join("\n\n"),
        sections,
    });
}

/// First non-empty occurrence of the designated title node
fn extract_title<T>(
    rules: &ArticleRules,
    document: &Html,
    session: &mut CrawlSession<T>,
) -> Option<String> {
    let selector = compile_selector(rules.title, session)?;
    let text = document
        .select(&selector)
        .map(|node| element_text(&node))
        .find(|text| !text.is_empty())?;

    let title = match rules.title_separator {
        Some(separator) => text.split(separator).next().unwrap_or(&text).trim().to_string(),
        None => text,
    };
    (!title.is_empty()).then_some(title)
}

/// Introduction block first, then the fragments of the first productive container
fn extract_body<T>(
    rules: &ArticleRules,
    document: &Html,
    session: &mut CrawlSession<T>,
) -> Vec<String> {
    let (intro_nodes, mut parts) = introduction_fragments(rules, document, session);

    let Some(container_sel) = compile_selector(rules.containers, session) else {
        return parts;
    };
    let Some(fragment_sel) = compile_selector(rules.fragments, session) else {
        return parts;
    };

    for container in document.select(&container_sel) {
        let fragments: Vec<String> = container
            .select(&fragment_sel)
            .filter(|f| !intro_nodes.contains(f))
            .map(|f| element_text(&f))
            .filter(|text| keep_fragment(text))
            .collect();

        if !fragments.is_empty() {
            for text in fragments {
                push_distinct(&mut parts, text);
            }
            break;
        }
    }

    parts
}

/// Filtered introduction texts, plus their nodes so they are not repeated
fn introduction_fragments<'a, T>(
    rules: &ArticleRules,
    document: &'a Html,
    session: &mut CrawlSession<T>,
) -> (Vec<ElementRef<'a>>, Vec<String>) {
    let mut nodes = Vec::new();
    let mut parts = Vec::new();

    if let Some(selector) = compile_selector(rules.introduction, session) {
        for node in document.select(&selector) {
            nodes.push(node);
            let text = element_text(&node);
            if keep_fragment(&text) {
                push_distinct(&mut parts, text);
            }
        }
    }

    (nodes, parts)
}

fn is_title(title_sel: &Option<Selector>, element: &ElementRef) -> bool {
    title_sel
        .as_ref()
        .is_some_and(|sel| sel.matches(element))
}

fn close_section((title, parts): (String, Vec<String>)) -> Option<Section> {
    let content = parts.join("\n\n");
    if title.is_empty() || content.is_empty() {
        return None;
    }
    Some(Section { title, content })
}

/// Exact duplicates are dropped, first occurrence wins
fn push_distinct(parts: &mut Vec<String>, text: String) {
    if !parts.contains(&text) {
        parts.push(text);
    }
}
