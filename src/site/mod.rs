//! Site Profiles for the crawled websites
//!
//! A [`SiteProfile`] bundles everything the crawler knows about one target website:
//! its base URL and host allow-list, the pacing applied to it, the extraction rules for
//! each page type and the default records served when a list crawl comes back empty.

mod defaults;
mod rules;

pub use rules::{
    ArticleRules, LifeEventDetailRules, LifeEventListRules, LifeEventRules, NavigationRules,
    SearchRules, SiteRules,
};

use crate::extract::{Category, LifeEvent};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Identifier of a built-in Site Profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteId {
    /// service-public.gouv.fr: procedures, life events
    ServicePublic,
    /// impots.gouv.fr: tax forms and articles
    Impots,
}

impl SiteId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServicePublic => "service-public",
            Self::Impots => "impots",
        }
    }

    /// Builds the profile for this site
    pub fn profile(&self) -> SiteProfile {
        match self {
            Self::ServicePublic => SiteProfile::service_public(),
            Self::Impots => SiteProfile::impots(),
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "service-public" | "service-public.gouv.fr" | "vosdroits" => Ok(Self::ServicePublic),
            "impots" | "impots.gouv.fr" => Ok(Self::Impots),
            other => Err(format!(
                "unknown site '{other}', expected 'service-public' or 'impots'"
            )),
        }
    }
}

/// How a site builds its search request URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchUrlStyle {
    /// `{base}{path}?{param}={query}`
    QueryParam {
        path: &'static str,
        param: &'static str,
    },
    /// `{base}{prefix}{escaped query}{suffix}`
    PathSegment {
        prefix: &'static str,
        suffix: &'static str,
    },
}

/// Configuration bundle for one target website
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Which built-in site this profile describes
    pub id: SiteId,

    /// Human-readable domain, used in messages and placeholder titles
    pub display_name: String,

    /// Base URL that relative paths are resolved against
    pub base_url: Url,

    /// Allowed hostnames (lowercase, bare form; "www." variants are implied)
    pub allowed_hosts: Vec<String>,

    /// Maximum number of requests in flight to this site
    pub max_parallelism: u32,

    /// Minimum delay between two requests to this site
    pub request_delay: Duration,

    /// Search request construction
    pub search_url: SearchUrlStyle,

    /// Path of the page whose navigation lists categories
    pub categories_path: &'static str,

    /// Template for generated category descriptions, `{}` is the lowercased name
    pub category_description: &'static str,

    /// Extraction rules per page type
    pub rules: SiteRules,

    /// Categories served when the crawl fails or finds nothing
    pub default_categories: Vec<Category>,

    /// Life events served when the crawl fails or finds nothing
    pub default_life_events: Vec<LifeEvent>,
}

impl SiteProfile {
    /// Profile for https://www.service-public.gouv.fr
    pub fn service_public() -> Self {
        let base_url = static_url("https://www.service-public.gouv.fr");
        let mut profile = Self {
            id: SiteId::ServicePublic,
            display_name: "service-public.gouv.fr".to_string(),
            base_url,
            allowed_hosts: vec!["service-public.gouv.fr".to_string()],
            max_parallelism: 1,
            request_delay: Duration::from_secs(1),
            search_url: SearchUrlStyle::QueryParam {
                path: "/particuliers/recherche",
                param: "keyword",
            },
            categories_path: "/particuliers",
            category_description: "Fiches pratiques : {}",
            rules: SiteRules::service_public(),
            default_categories: Vec::new(),
            default_life_events: Vec::new(),
        };
        profile.reset_defaults();
        profile
    }

    /// Profile for https://www.impots.gouv.fr
    pub fn impots() -> Self {
        let base_url = static_url("https://www.impots.gouv.fr");
        let mut profile = Self {
            id: SiteId::Impots,
            display_name: "impots.gouv.fr".to_string(),
            base_url,
            allowed_hosts: vec!["impots.gouv.fr".to_string()],
            max_parallelism: 1,
            request_delay: Duration::from_secs(1),
            search_url: SearchUrlStyle::PathSegment {
                prefix: "/recherche/",
                suffix: "?origin[]=impots&search_filter=Filtrer",
            },
            categories_path: "/particulier",
            category_description: "Information fiscale pour {}",
            rules: SiteRules::impots(),
            default_categories: Vec::new(),
            default_life_events: Vec::new(),
        };
        profile.reset_defaults();
        profile
    }

    /// Re-targets this profile at another origin
    ///
    /// The allow-list is replaced by the new host and the default records are rebuilt
    /// against the new base, so a profile can be pointed at a local server.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        if let Some(host) = base_url.host_str() {
            let host = host.to_lowercase();
            let bare = host.strip_prefix("www.").unwrap_or(&host).to_string();
            self.allowed_hosts = vec![bare];
        }
        self.base_url = base_url;
        self.reset_defaults();
        self
    }

    /// Overrides the pacing parameters
    pub fn with_politeness(mut self, max_parallelism: u32, request_delay: Duration) -> Self {
        self.max_parallelism = max_parallelism.max(1);
        self.request_delay = request_delay;
        self
    }

    /// Builds an absolute URL on this site from a path
    pub fn absolute(&self, path: &str) -> Option<Url> {
        self.base_url.join(path).ok()
    }

    /// URL of the search request issued for `query`
    pub fn search_url(&self, query: &str) -> Url {
        match &self.search_url {
            SearchUrlStyle::QueryParam { path, param } => {
                let mut url = self.absolute(path).unwrap_or_else(|| self.base_url.clone());
                url.query_pairs_mut().append_pair(param, query);
                url
            }
            SearchUrlStyle::PathSegment { prefix, suffix } => {
                let escaped: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
                self.absolute(&format!("{prefix}{escaped}{suffix}"))
                    .unwrap_or_else(|| self.base_url.clone())
            }
        }
    }

    /// URL of the page listing categories
    pub fn categories_url(&self) -> Url {
        self.absolute(self.categories_path)
            .unwrap_or_else(|| self.base_url.clone())
    }

    /// URL of the page listing life events, if the site has one
    pub fn life_events_url(&self) -> Option<Url> {
        let rules = self.rules.life_events.as_ref()?;
        self.absolute(rules.list.path)
    }

    /// Title substituted when a document has no usable title node
    pub fn placeholder_title(&self) -> String {
        format!("Article from {}", self.display_name)
    }

    pub fn describe_category(&self, name: &str) -> String {
        self.category_description
            .replace("{}", &name.to_lowercase())
    }

    fn reset_defaults(&mut self) {
        self.default_categories = defaults::categories(self);
        self.default_life_events = defaults::life_events(self);
    }
}

fn static_url(raw: &'static str) -> Url {
    Url::parse(raw).expect("built-in base URL is valid")
}
