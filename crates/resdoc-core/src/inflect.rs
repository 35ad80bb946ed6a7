use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Deterministic word inflection used to derive wire keys from type names.
pub trait Inflector: Send + Sync {
    /// `tag → tags`, `category → categories`.
    fn pluralize(&self, word: &str) -> String;
    /// Inverse of [`Inflector::pluralize`].
    fn singularize(&self, word: &str) -> String;
}

const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

// First match wins.
const PLURAL_RULES: &[(&str, &str)] = &[
    (r"(?i)(quiz)$", "${1}zes"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)(octop|vir)(?:us|i)$", "${1}i"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(buffal|tomat|potat)o$", "${1}oes"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)sis$", "ses"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)s$", "s"),
    (r"$", "s"),
];

const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)(alias|status)(?:es)?$", "${1}"),
    (r"(?i)(octop|vir)(?:us|i)$", "${1}us"),
    (r"(?i)(buffal|tomat|potat)oes$", "${1}o"),
    (r"(?i)(bus)(?:es)?$", "${1}"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)(hive|tive)s$", "${1}"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(analy|ba|diagno|parenthe|progno|synop|the)ses$", "${1}sis"),
    (r"(?i)([ti])a$", "${1}um"),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)s$", ""),
];

type Rules = Vec<(Regex, &'static str)>;

fn compile(rules: &[(&str, &'static str)]) -> Rules {
    rules
        .iter()
        .map(|(pattern, replacement)| {
            (Regex::new(pattern).expect("invalid inflection rule"), *replacement)
        })
        .collect()
}

// Compiled once per process and shared by every `English`.
fn plural_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| compile(PLURAL_RULES))
}

fn singular_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| compile(SINGULAR_RULES))
}

/// English inflection heuristic with irregular and uncountable words.
///
/// Only the last segment of a dashed or underscored name is inflected, so
/// `blog-post` becomes `blog-posts` and `sales-person` becomes `sales-people`.
#[derive(Debug, Clone)]
pub struct English {
    irregular: BTreeMap<String, String>,
}

impl Default for English {
    fn default() -> Self {
        Self::new()
    }
}

impl English {
    /// Builds the inflector with the built-in word lists.
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR
                .iter()
                .map(|(singular, plural)| (singular.to_string(), plural.to_string()))
                .collect(),
        }
    }

    /// Adds or overrides an irregular `singular → plural` pair.
    pub fn with_irregular(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.irregular.insert(singular.into(), plural.into());
        self
    }

    fn inflect_last_segment(&self, word: &str, inflect: impl Fn(&str) -> String) -> String {
        match word.rfind(|c: char| c == '-' || c == '_') {
            Some(idx) => format!("{}{}", &word[..=idx], inflect(&word[idx + 1..])),
            None => inflect(word),
        }
    }

    fn apply(rules: &[(Regex, &'static str)], word: &str) -> String {
        rules
            .iter()
            .find(|(re, _)| re.is_match(word))
            .map(|(re, replacement)| re.replace(word, *replacement).into_owned())
            .unwrap_or_else(|| word.to_string())
    }

    fn is_uncountable(word: &str) -> bool {
        UNCOUNTABLE.contains(&word.to_ascii_lowercase().as_str())
    }
}

impl Inflector for English {
    fn pluralize(&self, word: &str) -> String {
        self.inflect_last_segment(word, |segment| {
            if segment.is_empty() || Self::is_uncountable(segment) {
                return segment.to_string();
            }
            if let Some(plural) = self.irregular.get(&segment.to_ascii_lowercase()) {
                return plural.clone();
            }
            if self.irregular.values().any(|plural| plural == segment) {
                return segment.to_string();
            }
            Self::apply(plural_rules(), segment)
        })
    }

    fn singularize(&self, word: &str) -> String {
        self.inflect_last_segment(word, |segment| {
            if segment.is_empty() || Self::is_uncountable(segment) {
                return segment.to_string();
            }
            let lower = segment.to_ascii_lowercase();
            if let Some((singular, _)) = self.irregular.iter().find(|(_, plural)| **plural == lower) {
                return singular.clone();
            }
            if self.irregular.contains_key(&lower) {
                return segment.to_string();
            }
            Self::apply(singular_rules(), segment)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_regular_words() {
        let english = English::new();
        for (singular, plural) in [
            ("tag", "tags"),
            ("category", "categories"),
            ("address", "addresses"),
            ("box", "boxes"),
            ("church", "churches"),
            ("status", "statuses"),
            ("day", "days"),
            ("knife", "knives"),
            ("half", "halves"),
            ("analysis", "analyses"),
            ("matrix", "matrices"),
            ("blog-post", "blog-posts"),
            ("line_item", "line_items"),
        ] {
            assert_eq!(english.pluralize(singular), plural, "pluralize {}", singular);
            assert_eq!(english.singularize(plural), singular, "singularize {}", plural);
        }
    }

    #[test]
    fn irregular_and_uncountable_words() {
        let english = English::new();
        assert_eq!(english.pluralize("person"), "people");
        assert_eq!(english.singularize("people"), "person");
        assert_eq!(english.pluralize("sales-person"), "sales-people");
        assert_eq!(english.pluralize("series"), "series");
        assert_eq!(english.singularize("series"), "series");
        assert_eq!(english.singularize("person"), "person");
        assert_eq!(english.pluralize("people"), "people");
    }

    #[test]
    fn custom_irregulars_override_rules() {
        let english = English::new().with_irregular("cactus", "cacti");
        assert_eq!(english.pluralize("cactus"), "cacti");
        assert_eq!(english.singularize("cacti"), "cactus");
    }

    #[test]
    fn singularizing_a_singular_is_stable() {
        let english = English::new();
        for word in ["tag", "comment", "author", "user", "address"] {
            assert_eq!(english.singularize(word), word);
        }
    }

    #[test]
    fn rule_tables_are_compiled_once() {
        assert!(std::ptr::eq(plural_rules(), plural_rules()));
        assert!(std::ptr::eq(singular_rules(), singular_rules()));

        let first = English::new();
        let second = English::new().with_irregular("cactus", "cacti");
        assert_eq!(first.pluralize("category"), second.pluralize("category"));
    }
}
