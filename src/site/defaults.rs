//! Fixed default records, served by the fallback resolver

use super::{SiteId, SiteProfile};
use crate::extract::{Category, LifeEvent};

const SERVICE_PUBLIC_CATEGORIES: &[(&str, &str)] = &[
    ("Papiers - Citoyenneté - Élections", "N19810"),
    ("Famille - Scolarité", "N19805"),
    ("Social - Santé", "N19811"),
    ("Travail - Formation", "N19806"),
    ("Logement", "N19808"),
    ("Transports - Mobilité", "N19812"),
    ("Argent - Impôts - Consommation", "N19803"),
    ("Justice", "N19807"),
    ("Étranger - Europe", "N19804"),
    ("Loisirs - Sports - Culture", "N19809"),
];

const IMPOTS_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Particulier", "Information fiscale pour les particuliers", "/particulier"),
    ("Professionnel", "Information fiscale pour les professionnels", "/professionnel"),
    ("Partenaire", "Information pour les partenaires", "/partenaire"),
    ("Collectivité", "Information pour les collectivités", "/collectivite"),
    ("International", "Information fiscale internationale", "/international"),
];

const SERVICE_PUBLIC_LIFE_EVENTS: &[(&str, &str)] = &[
    ("J'attends un enfant", "F16225"),
    ("Je déménage", "F17899"),
    ("Un proche est décédé", "F16507"),
    ("Je me sépare", "F17881"),
    ("Je prépare ma retraite", "F16228"),
    ("Je cherche un emploi", "F32003"),
];

pub(super) fn categories(site: &SiteProfile) -> Vec<Category> {
    match site.id {
        SiteId::ServicePublic => SERVICE_PUBLIC_CATEGORIES
            .iter()
            .map(|(name, id)| Category {
                name: (*name).to_string(),
                description: site.describe_category(name),
                url: site
                    .absolute(&format!("/particuliers/vosdroits/{id}"))
                    .map(|u| u.to_string()),
            })
            .collect(),
        SiteId::Impots => IMPOTS_CATEGORIES
            .iter()
            .map(|(name, description, path)| Category {
                name: (*name).to_string(),
                description: (*description).to_string(),
                url: site.absolute(path).map(|u| u.to_string()),
            })
            .collect(),
    }
}

pub(super) fn life_events(site: &SiteProfile) -> Vec<LifeEvent> {
    match site.id {
        SiteId::ServicePublic => SERVICE_PUBLIC_LIFE_EVENTS
            .iter()
            .filter_map(|(title, id)| {
                let url = site.absolute(&format!("/particuliers/vosdroits/{id}"))?;
                Some(LifeEvent {
                    title: (*title).to_string(),
                    url: url.to_string(),
                })
            })
            .collect(),
        SiteId::Impots => Vec::new(),
    }
}
