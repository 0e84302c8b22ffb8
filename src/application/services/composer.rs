//! Template-driven answers over retrieved snippets.
//!
//! Pure and deterministic: the same query and documents always give the
//! same text.

use crate::application::templates as tpl;
use crate::domain::{
    classifier::{detect_category, extract_city, is_greeting},
    Category,
};

pub fn compose(query: &str, documents: &[String]) -> String {
    if is_greeting(query) {
        return tpl::GREETING.to_string();
    }
    if documents.is_empty() {
        return tpl::fallback(query);
    }

    let category = detect_category(query);
    match category {
        Some(Category::Transport) => return tpl::TRANSPORT.join("\n"),
        Some(Category::Periode) => return tpl::PERIODE.join("\n"),
        _ => {}
    }

    let max_items = match category {
        Some(Category::Hebergement | Category::Restauration) => 2,
        _ => 3,
    };
    let items = &documents[..documents.len().min(max_items)];

    match category {
        Some(Category::Hebergement) => lodging(items, query),
        Some(Category::Restauration) => restaurants(items, query),
        Some(Category::Prix) => prices(items, query),
        Some(Category::SiteTouristique) => sites(items),
        _ => general(items),
    }
}

fn lines_with<'a>(item: &'a str, markers: &[&str]) -> Vec<&'a str> {
    item.split('\n')
        .filter(|line| markers.iter().any(|m| line.contains(m)))
        .collect()
}

fn first_n(lines: &[&str], n: usize) -> String {
    lines[..lines.len().min(n)].join("\n")
}

fn lodging(items: &[String], query: &str) -> String {
    let header = extract_city(query)
        .map(|city| tpl::lodging_header(&city))
        .unwrap_or_else(|| tpl::LODGING_HEADER_DEFAULT.to_string());

    let mut out = vec![header, String::new()];
    for item in items {
        out.push(first_n(&lines_with(item, tpl::LODGING_MARKERS), 5));
        out.push(String::new());
    }
    out.push(tpl::LODGING_CLOSING.to_string());
    out.join("\n")
}

fn restaurants(items: &[String], query: &str) -> String {
    let lower = query.to_lowercase();
    if tpl::FOOD_QUERY_WORDS.iter().any(|w| lower.contains(w)) {
        return typical_food(items);
    }

    let header = extract_city(query)
        .map(|city| tpl::restaurant_header(&city))
        .unwrap_or_else(|| tpl::RESTAURANT_HEADER_DEFAULT.to_string());

    let mut out = vec![header, String::new()];
    for item in items {
        let essential = lines_with(item, tpl::RESTAURANT_MARKERS);
        if !essential.is_empty() {
            out.push(first_n(&essential, 4));
            out.push(String::new());
        }
    }
    if out.len() <= 2 {
        out.push(tpl::CITY_HINT.to_string());
    }
    out.join("\n")
}

fn typical_food(items: &[String]) -> String {
    let mut out = vec![tpl::TYPICAL_DISHES.to_string(), String::new()];
    let mut found = false;

    for item in items {
        if !tpl::RESTAURANT_HINTS.iter().any(|h| item.contains(h)) {
            continue;
        }
        let essential = lines_with(item, tpl::RESTAURANT_MARKERS);
        if !essential.is_empty() {
            out.push(first_n(&essential, 4));
            out.push(String::new());
            found = true;
        }
    }

    if !found {
        out.extend(tpl::DEFAULT_RESTAURANTS.iter().map(|l| l.to_string()));
    }
    out.push(tpl::FOOD_CLOSING.to_string());
    out.join("\n")
}

fn prices(items: &[String], query: &str) -> String {
    let mut out = vec![tpl::PRICE_HEADER.to_string(), String::new()];

    for item in items {
        let lines: Vec<&str> = item.split('\n').collect();
        let price_lines: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| {
                let lower = line.to_lowercase();
                tpl::PRICE_MARKERS.iter().any(|m| lower.contains(m))
            })
            .collect();
        if price_lines.is_empty() {
            continue;
        }

        if let Some(name) = lines
            .iter()
            .find(|line| tpl::NAME_MARKERS.iter().any(|m| line.contains(m)))
            .filter(|line| !line.is_empty())
        {
            out.push(name.to_string());
        }
        out.extend(price_lines.iter().take(2).map(|l| l.to_string()));
        out.push(String::new());
    }

    let lower = query.to_lowercase();
    if tpl::TRIP_BUDGET_WORDS.iter().any(|w| lower.contains(w)) {
        out.extend(tpl::TRIP_BUDGET.iter().map(|l| l.to_string()));
    }
    out.join("\n")
}

fn sites(items: &[String]) -> String {
    let mut out = vec![tpl::SITE_HEADER.to_string(), String::new()];

    for item in items {
        let essential: Vec<String> = item
            .split('\n')
            .filter_map(|line| {
                if tpl::SITE_MARKERS.iter().any(|m| line.contains(m)) {
                    Some(line.to_string())
                } else if line.contains(tpl::DESCRIPTION_MARKER) {
                    Some(format!("📝 {}", shorten_description(line)))
                } else {
                    None
                }
            })
            .take(5)
            .collect();
        out.extend(essential);
        out.push(String::new());
    }

    out.push(tpl::SITE_CLOSING.to_string());
    out.join("\n")
}

fn shorten_description(line: &str) -> String {
    let desc = line.replace(tpl::DESCRIPTION_PREFIX, "");
    if desc.chars().count() > tpl::DESCRIPTION_MAX_CHARS {
        let cut: String = desc.chars().take(tpl::DESCRIPTION_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        desc
    }
}

fn general(items: &[String]) -> String {
    let context = items[..items.len().min(2)].join("\n\n");
    format!(
        "{}\n\n{context}\n\n{}\n\n{}",
        tpl::GENERAL_INTRO,
        tpl::GENERAL_SEPARATOR,
        tpl::GENERAL_CLOSING
    )
}
