use std::collections::BTreeMap;

pub const HYGIENE: &str = "hygiene";
pub const EQUIPMENT_QUALITY: &str = "equipment_quality";
pub const LESS_CROWD: &str = "less_crowd";
pub const TRAINER_KNOWLEDGE: &str = "trainer_knowledge";
pub const PRICE: &str = "price";
pub const AMENITIES: &str = "amenities";
pub const ATMOSPHERE: &str = "atmosphere";

/// The fixed preference categories a recommendation request can weight
pub const CATEGORIES: [&str; 7] = [
    HYGIENE,
    EQUIPMENT_QUALITY,
    LESS_CROWD,
    TRAINER_KNOWLEDGE,
    PRICE,
    AMENITIES,
    ATMOSPHERE,
];

/// Mapping from preference category to the trigger words that signal it in review text
///
/// Built once at startup and shared read-only between requests. Trigger words are
/// stored lowercased and deduplicated per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTaxonomy {
    categories: BTreeMap<String, Vec<String>>,
}

impl KeywordTaxonomy {
    /// Build a taxonomy from arbitrary category/word pairs
    pub fn new<C, W, S>(entries: impl IntoIterator<Item = (C, W)>) -> Self
    where
        C: Into<String>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (category, words) in entries {
            let triggers = categories.entry(category.into()).or_default();
            for word in words {
                let word = word.as_ref().trim().to_lowercase();
                if !word.is_empty() && !triggers.contains(&word) {
                    triggers.push(word);
                }
            }
        }

        Self { categories }
    }

    /// Trigger words for a category, empty if the category is unknown
    pub fn triggers(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over `(category, trigger words)` in category name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(category, words)| (category.as_str(), words.as_slice()))
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        Self::new([
            (HYGIENE, vec!["clean", "sanitary", "hygienic", "spotless", "tidy"]),
            (
                EQUIPMENT_QUALITY,
                vec!["equipment", "machines", "weights", "dumbbells", "modern", "new"],
            ),
            (
                LESS_CROWD,
                vec!["crowded", "busy", "people", "packed", "empty", "spacious"],
            ),
            (
                TRAINER_KNOWLEDGE,
                vec!["trainer", "coach", "instructor", "knowledgeable", "helpful", "professional"],
            ),
            (
                PRICE,
                vec!["price", "cost", "expensive", "affordable", "cheap", "value"],
            ),
            (
                AMENITIES,
                vec!["pool", "sauna", "classes", "locker", "shower", "parking"],
            ),
            (
                ATMOSPHERE,
                vec!["atmosphere", "environment", "vibe", "friendly", "welcoming", "community"],
            ),
        ])
    }
}
