//! Theme classification for content items.
//!
//! A content item lands in exactly one of nine theme buckets. Rules live in a
//! single ordered table: every category rule comes before every tag rule, and
//! within each group themes are checked in priority order. The first matching
//! rule wins; nothing matching means [`ThemeId::DEFAULT`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeId {
    PrayerWudu,
    QuranDhikr,
    FoodSunnah,
    SleepNight,
    HygieneGrooming,
    FamilyKindness,
    CharitySocial,
    TravelDaily,
    DuaSpiritual,
}

impl ThemeId {
    pub const DEFAULT: ThemeId = ThemeId::DuaSpiritual;

    /// All themes in priority order.
    pub const ALL: [ThemeId; 9] = [
        ThemeId::PrayerWudu,
        ThemeId::QuranDhikr,
        ThemeId::FoodSunnah,
        ThemeId::SleepNight,
        ThemeId::HygieneGrooming,
        ThemeId::FamilyKindness,
        ThemeId::CharitySocial,
        ThemeId::TravelDaily,
        ThemeId::DuaSpiritual,
    ];

    pub fn as_str(self) -> &'static str {
        self.meta().key
    }

    pub fn meta(self) -> &'static ThemeMeta {
        // THEMES is laid out in ALL order.
        &THEMES[self as usize]
    }
}

/// Static display data for a theme.
#[derive(Debug, Serialize)]
pub struct ThemeMeta {
    pub id: ThemeId,
    #[serde(skip)]
    key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub image: &'static str,
}

pub static THEMES: [ThemeMeta; 9] = [
    ThemeMeta {
        id: ThemeId::PrayerWudu,
        key: "prayer_wudu",
        label: "Prayer & Wudu",
        color: "#2E7D6B",
        image: "themes/prayer_wudu.png",
    },
    ThemeMeta {
        id: ThemeId::QuranDhikr,
        key: "quran_dhikr",
        label: "Quran & Dhikr",
        color: "#3B5BA5",
        image: "themes/quran_dhikr.png",
    },
    ThemeMeta {
        id: ThemeId::FoodSunnah,
        key: "food_sunnah",
        label: "Food & Drink",
        color: "#D98E32",
        image: "themes/food_sunnah.png",
    },
    ThemeMeta {
        id: ThemeId::SleepNight,
        key: "sleep_night",
        label: "Sleep & Night",
        color: "#4A3F7A",
        image: "themes/sleep_night.png",
    },
    ThemeMeta {
        id: ThemeId::HygieneGrooming,
        key: "hygiene_grooming",
        label: "Hygiene & Grooming",
        color: "#3FA7C4",
        image: "themes/hygiene_grooming.png",
    },
    ThemeMeta {
        id: ThemeId::FamilyKindness,
        key: "family_kindness",
        label: "Family & Kindness",
        color: "#C2577A",
        image: "themes/family_kindness.png",
    },
    ThemeMeta {
        id: ThemeId::CharitySocial,
        key: "charity_social",
        label: "Charity & Community",
        color: "#7A9A3A",
        image: "themes/charity_social.png",
    },
    ThemeMeta {
        id: ThemeId::TravelDaily,
        key: "travel_daily",
        label: "Travel & Daily Life",
        color: "#8C6A4F",
        image: "themes/travel_daily.png",
    },
    ThemeMeta {
        id: ThemeId::DuaSpiritual,
        key: "dua_spiritual",
        label: "Dua & Spirituality",
        color: "#B8963E",
        image: "themes/dua_spiritual.png",
    },
];

/// Editorial category attached to a content item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PrayerWuduCategory,
    QuranDhikrCategory,
    FoodSunnahCategory,
    SleepNightCategory,
    HygieneGroomingCategory,
    FamilyKindnessCategory,
    CharitySocialCategory,
    TravelDailyCategory,
    DuaSpiritualCategory,
    /// Any category this build does not know about. Never matches a rule.
    #[serde(other)]
    Other,
}

/// A tagged item from the content catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>, category: Option<Category>, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug)]
enum Rule {
    Category(Category),
    AnyTag(&'static [&'static str]),
}

impl Rule {
    fn matches(&self, category: Option<Category>, tags: &HashSet<String>) -> bool {
        match self {
            Rule::Category(c) => category == Some(*c),
            Rule::AnyTag(candidates) => {
                !tags.is_empty() && candidates.iter().any(|t| tags.contains(*t))
            }
        }
    }
}

const PRAYER_TAGS: &[&str] = &[
    "salah", "prayer", "wudu", "ablution", "adhan", "masjid", "mosque", "qibla",
];
const QURAN_TAGS: &[&str] = &["quran", "dhikr", "recitation", "tasbih", "remembrance"];
const FOOD_TAGS: &[&str] = &["food", "eating", "drinking", "meal", "water", "dates", "honey"];
const SLEEP_TAGS: &[&str] = &["sleep", "night", "bedtime", "waking", "dream"];
const HYGIENE_TAGS: &[&str] = &["hygiene", "miswak", "grooming", "cleanliness", "bathing"];
const FAMILY_TAGS: &[&str] = &["family", "parents", "children", "kindness", "neighbors"];
const CHARITY_TAGS: &[&str] = &["charity", "sadaqah", "zakat", "greeting", "salam", "guest"];
const TRAVEL_TAGS: &[&str] = &["travel", "journey", "home", "leaving", "entering", "clothing"];
const DUA_TAGS: &[&str] = &["dua", "supplication", "spiritual"];

static RULES: [(Rule, ThemeId); 18] = [
    (Rule::Category(Category::PrayerWuduCategory), ThemeId::PrayerWudu),
    (Rule::Category(Category::QuranDhikrCategory), ThemeId::QuranDhikr),
    (Rule::Category(Category::FoodSunnahCategory), ThemeId::FoodSunnah),
    (Rule::Category(Category::SleepNightCategory), ThemeId::SleepNight),
    (Rule::Category(Category::HygieneGroomingCategory), ThemeId::HygieneGrooming),
    (Rule::Category(Category::FamilyKindnessCategory), ThemeId::FamilyKindness),
    (Rule::Category(Category::CharitySocialCategory), ThemeId::CharitySocial),
    (Rule::Category(Category::TravelDailyCategory), ThemeId::TravelDaily),
    (Rule::Category(Category::DuaSpiritualCategory), ThemeId::DuaSpiritual),
    (Rule::AnyTag(PRAYER_TAGS), ThemeId::PrayerWudu),
    (Rule::AnyTag(QURAN_TAGS), ThemeId::QuranDhikr),
    (Rule::AnyTag(FOOD_TAGS), ThemeId::FoodSunnah),
    (Rule::AnyTag(SLEEP_TAGS), ThemeId::SleepNight),
    (Rule::AnyTag(HYGIENE_TAGS), ThemeId::HygieneGrooming),
    (Rule::AnyTag(FAMILY_TAGS), ThemeId::FamilyKindness),
    (Rule::AnyTag(CHARITY_TAGS), ThemeId::CharitySocial),
    (Rule::AnyTag(TRAVEL_TAGS), ThemeId::TravelDaily),
    (Rule::AnyTag(DUA_TAGS), ThemeId::DuaSpiritual),
];

fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> HashSet<String> {
    tags.iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Classify a category/tag pair. Total: falls back to [`ThemeId::DEFAULT`].
pub fn classify_parts<S: AsRef<str>>(category: Option<Category>, tags: &[S]) -> ThemeId {
    let tags = normalize_tags(tags);
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(category, &tags))
        .map(|(_, theme)| *theme)
        .unwrap_or(ThemeId::DEFAULT)
}

pub fn classify(record: &ContentRecord) -> ThemeId {
    classify_parts(record.category, &record.tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wins() {
        let rec = ContentRecord::new("a", Some(Category::PrayerWuduCategory), &["food", "sleep"]);
        assert_eq!(classify(&rec), ThemeId::PrayerWudu);
    }

    #[test]
    fn test_salah_tag_wins_over_later_tags() {
        let rec = ContentRecord::new("a", None, &["food", "salah", "travel"]);
        assert_eq!(classify(&rec), ThemeId::PrayerWudu);
    }

    #[test]
    fn test_category_beats_higher_priority_tag() {
        let rec = ContentRecord::new("a", Some(Category::FoodSunnahCategory), &["salah"]);
        assert_eq!(classify(&rec), ThemeId::FoodSunnah);
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let rec = ContentRecord::new("a", None, &["unknown_tag"]);
        assert_eq!(classify(&rec), ThemeId::DuaSpiritual);
    }

    #[test]
    fn test_empty_record_falls_back() {
        let rec = ContentRecord::new("a", None, &[]);
        assert_eq!(classify(&rec), ThemeId::DEFAULT);
    }

    #[test]
    fn test_tags_case_insensitive() {
        let rec = ContentRecord::new("a", None, &["FOOD", "Eating"]);
        assert_eq!(classify(&rec), ThemeId::FoodSunnah);
        let padded = ContentRecord::new("b", None, &["  Miswak "]);
        assert_eq!(classify(&padded), ThemeId::HygieneGrooming);
    }

    #[test]
    fn test_unknown_category_uses_tags() {
        let rec: ContentRecord = serde_json::from_value(serde_json::json!({
            "id": "x",
            "category": "astronomy_category",
            "tags": ["Sleep"]
        }))
        .unwrap();
        assert_eq!(rec.category, Some(Category::Other));
        assert_eq!(classify(&rec), ThemeId::SleepNight);
    }

    #[test]
    fn test_category_wire_name() {
        let rec: ContentRecord = serde_json::from_value(serde_json::json!({
            "id": "x",
            "category": "prayer_wudu_category"
        }))
        .unwrap();
        assert_eq!(classify(&rec), ThemeId::PrayerWudu);
    }

    #[test]
    fn test_meta_table_matches_ids() {
        for (i, theme) in ThemeId::ALL.iter().enumerate() {
            assert_eq!(THEMES[i].id, *theme);
            let json = serde_json::to_string(theme).unwrap();
            assert_eq!(json, format!("\"{}\"", theme.as_str()));
        }
    }

    #[test]
    fn test_every_theme_reachable_by_category() {
        let categories = [
            Category::PrayerWuduCategory,
            Category::QuranDhikrCategory,
            Category::FoodSunnahCategory,
            Category::SleepNightCategory,
            Category::HygieneGroomingCategory,
            Category::FamilyKindnessCategory,
            Category::CharitySocialCategory,
            Category::TravelDailyCategory,
            Category::DuaSpiritualCategory,
        ];
        for (category, theme) in categories.iter().zip(ThemeId::ALL) {
            assert_eq!(classify_parts::<&str>(Some(*category), &[]), theme);
        }
    }
}
