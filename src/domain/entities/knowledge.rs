//! Structured records of the tourism knowledge base and their text rendering.
//!
//! Field names follow the JSON produced by the data-preparation tooling.
//! Fields are parsed leniently: a missing or malformed value becomes `None`
//! (or an empty list) instead of failing the whole file.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NOT_SPECIFIED: &str = "Non spécifié";
const VARIABLE: &str = "Variable";
const ALL_YEAR: &str = "Toute l'année";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KnowledgeBase {
    #[serde(deserialize_with = "lenient_records")]
    pub sites_touristiques: Vec<SiteRecord>,
    #[serde(deserialize_with = "lenient_records")]
    pub hebergements: Vec<LodgingRecord>,
    #[serde(deserialize_with = "lenient_records")]
    pub restaurants: Vec<RestaurantRecord>,
    #[serde(deserialize_with = "lenient_records")]
    pub infos_pratiques: Vec<PracticalInfoRecord>,
    #[serde(deserialize_with = "lenient_records")]
    pub transport: Vec<TransportRecord>,
    #[serde(deserialize_with = "lenient_records")]
    pub culture: Vec<EventRecord>,
    #[serde(deserialize_with = "lenient_records")]
    pub evenements: Vec<EventRecord>,
}

impl KnowledgeBase {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn record_count(&self) -> usize {
        self.sites_touristiques.len()
            + self.hebergements.len()
            + self.restaurants.len()
            + self.infos_pratiques.len()
            + self.transport.len()
            + self.culture.len()
            + self.evenements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub nom: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ville: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub prix: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub horaires: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub meilleure_periode: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub duree_visite: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub activites: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub conseils: Option<String>,
}

impl SiteRecord {
    pub fn render(&self) -> String {
        let mut parts = vec![
            format!("📍 Site touristique : {}", or_empty(&self.nom)),
            format!(
                "📌 Localisation : {}, {}",
                or_empty(&self.ville),
                or_empty(&self.region)
            ),
            format!("📝 Description : {}", or_empty(&self.description)),
            format!("💰 Prix d'entrée : {}", or(&self.prix, NOT_SPECIFIED)),
            format!("🕐 Horaires : {}", or(&self.horaires, NOT_SPECIFIED)),
            format!("📅 Meilleure période : {}", or(&self.meilleure_periode, ALL_YEAR)),
            format!("⏱️ Durée de visite : {}", or(&self.duree_visite, VARIABLE)),
        ];

        if !self.activites.is_empty() {
            parts.push(format!("🎯 Activités : {}", self.activites.join(", ")));
        }
        if let Some(conseils) = present(&self.conseils) {
            parts.push(format!("💡 Conseils : {conseils}"));
        }

        parts.join("\n")
    }

    /// Side document focused on entrance fees, if a price is known.
    pub fn render_price(&self) -> Option<String> {
        let prix = present(&self.prix)?;
        Some(format!(
            "Prix pour {}: {prix}. Tarifs d'entrée: {prix}",
            or_empty(&self.nom)
        ))
    }

    /// Side document listing what to do on site, if any activity is known.
    pub fn render_activities(&self) -> Option<String> {
        if self.activites.is_empty() {
            return None;
        }
        let list = self.activites.join(", ");
        Some(format!(
            "Activités à {}: {list}. Que faire: {list}",
            or_empty(&self.nom)
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LodgingRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub nom: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub categorie: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ville: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub prix_nuit: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub telephone: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub services: Vec<String>,
}

impl LodgingRecord {
    pub fn render(&self) -> String {
        let mut parts = vec![
            format!("🏨 Hébergement : {}", or_empty(&self.nom)),
            format!("⭐ Type : {}", or_empty(&self.categorie)),
            format!("📍 Ville : {}", or_empty(&self.ville)),
            format!("💰 Prix par nuit : {}", or(&self.prix_nuit, VARIABLE)),
        ];

        if let Some(telephone) = present(&self.telephone) {
            parts.push(format!("📞 Contact : {telephone}"));
        }
        if !self.services.is_empty() {
            parts.push(format!("✨ Services : {}", self.services.join(", ")));
        }

        parts.join("\n")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub nom: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cuisine: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ville: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub budget_moyen: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub horaires: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub specialites: Vec<String>,
}

impl RestaurantRecord {
    pub fn render(&self) -> String {
        let mut parts = vec![
            format!("🍽️ Restaurant : {}", or_empty(&self.nom)),
            format!("👨‍🍳 Cuisine : {}", or_empty(&self.cuisine)),
            format!("📍 Ville : {}", or_empty(&self.ville)),
            format!("💰 Budget moyen : {}", or(&self.budget_moyen, VARIABLE)),
            format!("🕐 Horaires : {}", or_empty(&self.horaires)),
        ];

        if !self.specialites.is_empty() {
            parts.push(format!("⭐ Spécialités : {}", self.specialites.join(", ")));
        }

        parts.join("\n")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PracticalInfoRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub categorie: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub titre: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl PracticalInfoRecord {
    pub fn render(&self) -> String {
        format!(
            "{}: {}.\n{}",
            or_empty(&self.categorie),
            or_empty(&self.titre),
            or_empty(&self.description)
        )
    }
}

/// A mode of transport. Apart from `type`, every key is rendered as a labeled
/// line, so the set of fields is open.
#[derive(Debug, Clone, Default)]
pub struct TransportRecord {
    pub mode: Option<String>,
    pub details: Vec<(String, String)>,
}

impl<'de> Deserialize<'de> for TransportRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Value::Object(map) = value else {
            return Ok(Self::default());
        };

        let mut record = Self::default();
        for (key, value) in map {
            if key == "type" {
                record.mode = value_to_string(&value);
            } else if let Some(text) = value_to_text(&value) {
                record.details.push((key, text));
            }
        }
        Ok(record)
    }
}

impl TransportRecord {
    pub fn render(&self) -> String {
        let mut parts = vec![format!("🚗 Transport : {}", or_empty(&self.mode))];
        parts.extend(
            self.details
                .iter()
                .map(|(key, value)| format!("• {} : {value}", humanize_key(key))),
        );
        parts.join("\n")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub nom: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub periode: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub lieu: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub prix: Option<String>,
}

impl EventRecord {
    pub fn render(&self) -> String {
        let mut parts = vec![
            format!("🎭 Événement : {}", or_empty(&self.nom)),
            format!("🎪 Type : {}", or_empty(&self.kind)),
            format!("📅 Période : {}", or(&self.periode, NOT_SPECIFIED)),
            format!("📍 Lieu : {}", or_empty(&self.lieu)),
            format!("📝 Description : {}", or_empty(&self.description)),
        ];
        if let Some(prix) = present(&self.prix) {
            parts.push(format!("💰 Prix : {prix}"));
        }
        parts.join("\n")
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().filter_map(value_to_string).collect();
            (!items.is_empty()).then(|| items.join(", "))
        }
        other => value_to_string(other),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(value_to_string(&Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().filter_map(value_to_string).collect(),
        _ => Vec::new(),
    })
}

fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_site() -> SiteRecord {
        serde_json::from_value(serde_json::json!({
            "nom": "Test Site",
            "ville": "Test Ville",
            "region": "Test Region",
            "description": "Description test",
            "prix": "1000 FCFA",
            "activites": ["Activité 1", "Activité 2"]
        }))
        .unwrap()
    }

    #[test]
    fn test_site_render_contains_fields_and_placeholders() {
        let rendered = sample_site().render();

        assert!(rendered.contains("📍 Site touristique : Test Site"));
        assert!(rendered.contains("📌 Localisation : Test Ville, Test Region"));
        assert!(rendered.contains("💰 Prix d'entrée : 1000 FCFA"));
        assert!(rendered.contains("🕐 Horaires : Non spécifié"));
        assert!(rendered.contains("📅 Meilleure période : Toute l'année"));
        assert!(rendered.contains("⏱️ Durée de visite : Variable"));
        assert!(rendered.contains("🎯 Activités : Activité 1, Activité 2"));
        assert!(!rendered.contains("💡 Conseils"));
    }

    #[test]
    fn test_site_side_documents() {
        let site = sample_site();
        assert_eq!(
            site.render_price().as_deref(),
            Some("Prix pour Test Site: 1000 FCFA. Tarifs d'entrée: 1000 FCFA")
        );
        assert_eq!(
            site.render_activities().as_deref(),
            Some("Activités à Test Site: Activité 1, Activité 2. Que faire: Activité 1, Activité 2")
        );

        let bare = SiteRecord {
            prix: Some("  ".into()),
            ..Default::default()
        };
        assert!(bare.render_price().is_none());
        assert!(bare.render_activities().is_none());
    }

    #[test]
    fn test_lodging_render_optional_lines() {
        let hotel = LodgingRecord {
            nom: Some("Villa Rose".into()),
            categorie: Some("Maison d'hôtes".into()),
            ville: Some("Bobo-Dioulasso".into()),
            ..Default::default()
        };
        let rendered = hotel.render();

        assert_eq!(
            rendered,
            "🏨 Hébergement : Villa Rose\n⭐ Type : Maison d'hôtes\n📍 Ville : Bobo-Dioulasso\n💰 Prix par nuit : Variable"
        );
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let kb = KnowledgeBase::from_json(
            r#"{
                "hebergements": [
                    {"nom": 42, "ville": null, "services": "Piscine"},
                    "not an object"
                ],
                "restaurants": {"nom": "wrong shape"},
                "unknown_group": []
            }"#,
        )
        .unwrap();

        assert_eq!(kb.hebergements.len(), 1);
        assert_eq!(kb.hebergements[0].nom.as_deref(), Some("42"));
        assert_eq!(kb.hebergements[0].ville, None);
        assert!(kb.hebergements[0].services.is_empty());
        assert!(kb.restaurants.is_empty());
    }

    #[test]
    fn test_transport_record_renders_every_field() {
        let record: TransportRecord = serde_json::from_value(serde_json::json!({
            "type": "Bus",
            "compagnies": ["STMB", "TSR"],
            "principales_liaisons": "Ouaga-Bobo (4h, 5000 FCFA)"
        }))
        .unwrap();
        let rendered = record.render();

        assert!(rendered.starts_with("🚗 Transport : Bus"));
        assert!(rendered.contains("• Compagnies : STMB, TSR"));
        assert!(rendered.contains("• Principales liaisons : Ouaga-Bobo (4h, 5000 FCFA)"));
    }

    #[test]
    fn test_practical_info_render() {
        let info = PracticalInfoRecord {
            categorie: Some("Climat".into()),
            titre: Some("Quand visiter".into()),
            description: Some("Deux saisons.".into()),
        };
        assert_eq!(info.render(), "Climat: Quand visiter.\nDeux saisons.");
    }
}
