//! Fixed French copy used by the response composer.

pub const GREETING: &str = "👋 Bonjour ! Je suis votre assistant touristique pour le Burkina Faso.

Je peux vous aider à :
- Découvrir les sites touristiques
- Trouver un hébergement
- Vous renseigner sur la gastronomie
- Planifier votre voyage

Que souhaitez-vous savoir ?";

/// `{query}` is replaced by the user's question.
pub const FALLBACK: &str = "Je n'ai pas trouvé d'informations spécifiques sur \"{query}\".

Je peux vous aider avec :
- Sites touristiques du Burkina Faso
- Hébergements à Ouagadougou, Banfora, Bobo-Dioulasso
- Gastronomie locale
- Meilleures périodes pour visiter
- Transports et déplacements

Reformulez votre question ou choisissez un sujet !";

pub const TRANSPORT: &[&str] = &[
    "🚗 **Comment se déplacer au Burkina Faso** :",
    "",
    "✈️ **Avion**",
    "   • Aéroport : Ouagadougou (international)",
    "   • Compagnies : Air France, Brussels Airlines, Ethiopian Airlines",
    "   • Vol intérieur : Ouaga ↔ Bobo-Dioulasso (Air Burkina)",
    "",
    "🚌 **Bus interurbain**",
    "   • Ouaga → Bobo : 4h, 5,000 FCFA",
    "   • Ouaga → Banfora : 6h, 7,000 FCFA",
    "   • Compagnies : STMB, TSR, TCV, Rakieta",
    "",
    "🚕 **Taxi en ville**",
    "   • Course : 1,000-3,000 FCFA selon distance",
    "   • Toujours négocier le prix avant",
    "",
    "🚙 **Location de voiture**",
    "   • Avec chauffeur : 40,000-80,000 FCFA/jour",
    "   • Recommandé pour visiter plusieurs sites",
    "",
    "💡 **Conseil** : Réservez les bus à l'avance en haute saison !",
];

pub const PERIODE: &[&str] = &[
    "📅 **Meilleure période pour visiter le Burkina Faso** :",
    "",
    "🌤️ **Saison sèche (octobre à mai)** - RECOMMANDÉE",
    "   • Idéale pour le tourisme",
    "   • Températures : 25-35°C",
    "   • Meilleure période : novembre à février (plus frais)",
    "",
    "🌧️ **Saison des pluies (juin à septembre)**",
    "   • Cascades au débit maximal",
    "   • Températures : 20-30°C",
    "   • Paysages verdoyants",
    "",
    "💡 **Conseil** : Privilégiez novembre-février pour un climat agréable !",
];

pub const LODGING_HEADER_DEFAULT: &str = "🏨 Hébergements recommandés :";
pub const LODGING_MARKERS: &[&str] = &["🏨", "⭐", "📍", "💰", "📞"];
pub const LODGING_CLOSING: &str = "💡 Besoin d'autres détails ? Demandez-moi !";

pub fn lodging_header(city: &str) -> String {
    format!("🏨 Hébergements à {city} :")
}

/// Query words that ask about food in general rather than a place to eat.
pub const FOOD_QUERY_WORDS: &[&str] = &["manger", "plat", "cuisine", "gastronomie"];

pub const TYPICAL_DISHES: &str = "🍽️ **Plats typiques burkinabè** :

• **Tô** : Pâte de mil ou maïs accompagnée de sauce
• **Riz gras** : Riz cuit avec viande et légumes
• **Poulet bicyclette** : Poulet local grillé
• **Brochettes** : Viande grillée sur brochettes
• **Dolo** : Bière de mil traditionnelle

**Où manger à Ouagadougou :**";

pub const RESTAURANT_HINTS: &[&str] = &["🍽️", "Restaurant", "Cuisine"];
pub const RESTAURANT_MARKERS: &[&str] = &["🍽️", "👨‍🍳", "📍", "💰"];

pub const DEFAULT_RESTAURANTS: &[&str] = &[
    "🍽️ Restaurant : Le Gondwana",
    "👨‍🍳 Cuisine : Internationale et Burkinabè",
    "📍 Ville : Ouagadougou",
    "💰 Budget moyen : 10,000 - 20,000 FCFA",
    "",
    "🍽️ Restaurant : Maquis Chez Tantie",
    "👨‍🍳 Cuisine : Locale",
    "📍 Ville : Ouagadougou",
    "💰 Budget moyen : 2,000 - 5,000 FCFA",
    "",
];

pub const FOOD_CLOSING: &str = "💡 Pour d'autres villes, demandez-moi !";
pub const RESTAURANT_HEADER_DEFAULT: &str = "🍽️ Restaurants recommandés :";
pub const CITY_HINT: &str = "💡 Spécifiez une ville (Ouagadougou, Banfora, Bobo-Dioulasso) !";

pub fn restaurant_header(city: &str) -> String {
    format!("🍽️ Restaurants à {city} :")
}

pub const PRICE_HEADER: &str = "💰 Tarifs :";
/// Matched against the lower-cased line.
pub const PRICE_MARKERS: &[&str] = &["💰", "prix", "fcfa", "tarif"];
pub const NAME_MARKERS: &[&str] = &["📍", "🏨", "🍽️", "Site", "Hébergement", "Restaurant"];
pub const TRIP_BUDGET_WORDS: &[&str] = &["séjour", "voyage", "budget global", "coûte un"];

pub const TRIP_BUDGET: &[&str] = &[
    "💡 **Budget estimé pour un séjour** :",
    "• Économique : 20,000-35,000 FCFA/jour",
    "• Confort moyen : 40,000-70,000 FCFA/jour",
    "• Haut de gamme : 100,000+ FCFA/jour",
];

pub const SITE_HEADER: &str = "🏞️ Sites touristiques recommandés :";
pub const SITE_MARKERS: &[&str] = &["📍 Site", "📌 Localisation", "💰 Prix", "📅 Meilleure"];
pub const DESCRIPTION_MARKER: &str = "📝 Description";
pub const DESCRIPTION_PREFIX: &str = "📝 Description : ";
pub const DESCRIPTION_MAX_CHARS: usize = 150;
pub const SITE_CLOSING: &str = "💡 Pour plus de détails, demandez-moi !";

pub const GENERAL_INTRO: &str = "Voici ce que j'ai trouvé :";
pub const GENERAL_SEPARATOR: &str = "━━━━━━━━━━━━━━";
pub const GENERAL_CLOSING: &str = "💡 Besoin de précisions ? Demandez-moi !";

pub fn fallback(query: &str) -> String {
    FALLBACK.replace("{query}", query)
}
