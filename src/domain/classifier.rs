//! Keyword tables for query understanding.
//!
//! Everything here is a linear scan over ordered `(tag, keywords)` tables.
//! Table order matters: on equal scores the earlier category wins.

use crate::domain::Category;

const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Hebergement,
        &["dormir", "hôtel", "hébergement", "loger", "chambre", "auberge", "lodge", "campement"],
    ),
    (
        Category::Restauration,
        &["manger", "restaurant", "nourriture", "plat", "cuisine", "gastronomie", "spécialité", "repas"],
    ),
    (
        Category::Transport,
        &["déplacer", "transport", "taxi", "bus", "voiture", "location", "trajet", "aller", "voyage"],
    ),
    (
        Category::Prix,
        &["prix", "coût", "coûte", "tarif", "budget", "dépense", "combien"],
    ),
    (
        Category::Periode,
        &["période", "quand", "saison", "moment", "meilleur", "climat", "météo", "temps"],
    ),
    (
        Category::Activites,
        &["faire", "activité", "visite", "visiter", "découvrir", "excursion", "voir"],
    ),
    (
        Category::SiteTouristique,
        &["site", "lieu", "endroit", "cascade", "parc", "monument", "ruine", "musée", "mosquée"],
    ),
];

/// Reduced table used to tag free-text chunks at ingestion. First group with
/// any hit wins.
const CHUNK_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Hebergement, &["hébergement", "hôtel", "auberge"]),
    (Category::Restauration, &["restaurant", "gastronomie", "cuisine", "plat"]),
    (Category::Transport, &["transport", "déplacement", "taxi", "bus"]),
    (Category::SiteTouristique, &["cascade", "parc", "site", "monument", "ruine"]),
    (Category::Periode, &["climat", "saison", "période"]),
];

const GREETINGS: &[&str] = &["bonjour", "salut", "hello", "hey", "bonsoir", "hi", "coucou"];

/// Known cities, scanned in order. Short forms map to their full name.
const CITIES: &[(&str, Option<&str>)] = &[
    ("ouagadougou", None),
    ("banfora", None),
    ("bobo-dioulasso", None),
    ("bobo", Some("Bobo-Dioulasso")),
    ("ouaga", Some("Ouagadougou")),
];

pub fn detect_category(query: &str) -> Option<Category> {
    let lower = query.to_lowercase();
    let mut best: Option<(Category, usize)> = None;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let score = keywords.iter().filter(|k| lower.contains(*k)).count();
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((*category, score)),
        }
    }

    if let Some((category, score)) = best {
        tracing::debug!(category = %category, score, "category detected");
    }
    best.map(|(category, _)| category)
}

pub fn is_greeting(query: &str) -> bool {
    let lower = query.to_lowercase();
    GREETINGS.iter().any(|g| lower.contains(g))
}

/// Returns the display name of the first known city mentioned in `query`.
pub fn extract_city(query: &str) -> Option<String> {
    let lower = query.to_lowercase();
    CITIES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(needle, alias)| match alias {
            Some(full) => (*full).to_string(),
            None => title_case(needle),
        })
}

pub fn categorize_chunk(text: &str) -> Category {
    let lower = text.to_lowercase();
    CHUNK_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// Upper-cases the first letter of every alphabetic run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lodging_query() {
        assert_eq!(
            detect_category("Où dormir à Ouagadougou ?"),
            Some(Category::Hebergement)
        );
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(detect_category("HÔTEL pas cher"), Some(Category::Hebergement));
        assert_eq!(detect_category("Quel RESTAURANT ?"), Some(Category::Restauration));
    }

    #[test]
    fn test_detect_highest_score_wins() {
        // prix: "prix" + "combien" beats site_touristique: "cascade"
        assert_eq!(
            detect_category("Combien pour le prix des cascades ?"),
            Some(Category::Prix)
        );
    }

    #[test]
    fn test_detect_tie_keeps_first_category() {
        // one hit each for prix ("prix") and site_touristique ("cascade")
        assert_eq!(
            detect_category("Quel est le prix d'entrée aux cascades ?"),
            Some(Category::Prix)
        );
        // one hit each for periode ("quand") and activites ("voir")
        assert_eq!(detect_category("quand voir"), Some(Category::Periode));
    }

    #[test]
    fn test_detect_none_without_keywords() {
        assert_eq!(detect_category("Merci beaucoup"), None);
        assert_eq!(detect_category(""), None);
        assert_eq!(detect_category("12345"), None);
    }

    #[test]
    fn test_greeting_detection() {
        assert!(is_greeting("Bonjour"));
        assert!(is_greeting("salut toi"));
        assert!(is_greeting("COUCOU"));
        assert!(!is_greeting("Où dormir à Banfora ?"));
    }

    #[test]
    fn test_extract_city_with_aliases() {
        assert_eq!(extract_city("Où dormir à Ouagadougou ?").as_deref(), Some("Ouagadougou"));
        assert_eq!(extract_city("un hôtel à ouaga").as_deref(), Some("Ouagadougou"));
        assert_eq!(extract_city("restaurants à Bobo").as_deref(), Some("Bobo-Dioulasso"));
        assert_eq!(
            extract_city("hôtel à bobo-dioulasso").as_deref(),
            Some("Bobo-Dioulasso")
        );
        assert_eq!(extract_city("BANFORA").as_deref(), Some("Banfora"));
        assert_eq!(extract_city("à Gaoua"), None);
    }

    #[test]
    fn test_categorize_chunk_precedence() {
        assert_eq!(
            categorize_chunk("Un hôtel près de la cascade"),
            Category::Hebergement
        );
        assert_eq!(categorize_chunk("Le bus pour le parc"), Category::Transport);
        assert_eq!(categorize_chunk("Climat tropical"), Category::Periode);
        assert_eq!(categorize_chunk("Population: 21 millions"), Category::General);
    }
}
