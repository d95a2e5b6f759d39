//! Extraction rule sets, expressed as selector strings and path patterns
//!
//! Rules are plain data so a profile can be cloned and re-targeted freely; they are
//! compiled into selectors by the extraction pipeline.

/// Rules for a search listing page
#[derive(Debug, Clone)]
pub struct SearchRules {
    /// One node per candidate result
    pub candidate: &'static str,
    /// Link inside a candidate
    pub link: &'static str,
    /// Innermost title node, preferred to avoid duplicated outer text
    pub title_inner: &'static str,
    /// Outer title node, used when the inner one is empty
    pub title_outer: &'static str,
    pub description: &'static str,
    /// Document type label ("Formulaire", ...)
    pub kind: Option<&'static str>,
    pub date: Option<&'static str>,
}

/// Rules for a single document page
#[derive(Debug, Clone)]
pub struct ArticleRules {
    /// Designated title node, first non-empty occurrence wins
    pub title: &'static str,
    /// Title text is cut at the first occurrence of this separator
    pub title_separator: Option<&'static str>,
    /// `<meta>` node whose `content` becomes the description
    pub description_meta: Option<&'static str>,
    /// Introduction block, emitted before the body fragments
    pub introduction: &'static str,
    /// Content containers, the first one yielding text wins
    pub containers: &'static str,
    /// Headings, paragraphs and callouts collected inside a container
    pub fragments: &'static str,
    /// Breadcrumb used to derive the document kind
    pub breadcrumb: Option<&'static str>,
}

/// Rules for the category navigation
#[derive(Debug, Clone)]
pub struct NavigationRules {
    /// Link nodes inside the navigation container
    pub links: &'static str,
    /// Regex a link path must match to be a top-level category
    pub category_path: &'static str,
    /// Link texts that never name a category
    pub excluded_names: &'static [&'static str],
}

/// Rules for the life-event listing
#[derive(Debug, Clone)]
pub struct LifeEventListRules {
    pub path: &'static str,
    /// Links inside the themed list container
    pub links: &'static str,
}

/// Rules for a life-event guide
#[derive(Debug, Clone)]
pub struct LifeEventDetailRules {
    /// Regex the last path segment must match for a content sheet
    pub content_sheet_id: &'static str,
    /// Regex identifying a category (navigation) identifier
    pub category_id: &'static str,
    /// Section headings; every heading opens a new section
    pub section_heading: &'static str,
}

#[derive(Debug, Clone)]
pub struct LifeEventRules {
    pub list: LifeEventListRules,
    pub detail: LifeEventDetailRules,
}

/// All extraction rules of a site
#[derive(Debug, Clone)]
pub struct SiteRules {
    pub search: SearchRules,
    pub article: ArticleRules,
    pub navigation: NavigationRules,
    pub life_events: Option<LifeEventRules>,
}

const CONTAINERS: &str = "main, article, div.main-content, div.content";
const FRAGMENTS: &str = "h1, h2, h3, p, li, div.fr-callout, div.fr-card__desc";

impl SiteRules {
    pub fn service_public() -> Self {
        Self {
            search: SearchRules {
                candidate: "li.sp-result, div.fr-card",
                link: "a[href]",
                title_inner: "h3 a, .fr-card__title a",
                title_outer: "h3, .fr-card__title",
                description: "p.fr-card__desc, p.sp-result__desc",
                kind: Some(".fr-card__detail, .fr-tag"),
                date: None,
            },
            article: ArticleRules {
                title: "h1",
                title_separator: None,
                description_meta: Some("meta[property='og:description']"),
                introduction: "p.fr-text--lead, div.sp-intro",
                containers: CONTAINERS,
                fragments: FRAGMENTS,
                breadcrumb: Some("nav.fr-breadcrumb, div.fr-breadcrumb"),
            },
            navigation: NavigationRules {
                links: "nav.fr-nav a.fr-nav__link",
                category_path: r"^/particuliers/vosdroits/N\d+/?$",
                excluded_names: &["Accueil"],
            },
            life_events: Some(LifeEventRules {
                list: LifeEventListRules {
                    path: "/particuliers",
                    links: "#comment-faire-si a[href], .sp-life-events a[href]",
                },
                detail: LifeEventDetailRules {
                    content_sheet_id: r"^F\d+$",
                    category_id: r"^N\d+$",
                    section_heading: "h2",
                },
            }),
        }
    }

    pub fn impots() -> Self {
        Self {
            search: SearchRules {
                candidate: "div.fr-card",
                link: "a[href]",
                title_inner: "h3.fr-card__title a",
                title_outer: "h3.fr-card__title",
                description: "p.fr-card__desc",
                kind: Some("div.fr-card__detail"),
                date: Some("p.fr-card__detail"),
            },
            article: ArticleRules {
                title: "head > title",
                title_separator: Some(" | "),
                description_meta: Some("meta[property='og:title']"),
                introduction: "p.fr-text--lead",
                containers: CONTAINERS,
                fragments: FRAGMENTS,
                breadcrumb: Some("div.fr-breadcrumb, nav.fr-breadcrumb"),
            },
            navigation: NavigationRules {
                links: "nav.fr-nav a.fr-nav__link",
                category_path: r"^/[a-z-]+/?$",
                excluded_names: &["Accueil"],
            },
            life_events: None,
        }
    }
}
