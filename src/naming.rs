use regex::Regex;
use std::sync::LazyLock;

/// A lower-case ASCII letter directly followed by an upper-case one.
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("case boundary pattern is valid"));

/// The naming-convention forms derived from a single module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingVariants {
    pub canonical: String,
    pub pascal: String,
    pub camel: String,
    pub kebab: String,
    pub snake: String,
    pub upper_snake: String,
}

impl NamingVariants {
    /// Derives every variant from `name`. The name itself is taken verbatim.
    pub fn from_name(name: &str) -> Self {
        Self {
            canonical: name.to_string(),
            pascal: pascal_case(name),
            camel: camel_case(name),
            kebab: kebab_case(name),
            snake: snake_case(name),
            upper_snake: upper_snake_case(name),
        }
    }
}

/// Upper-cases the first character only: `userProfile` -> `UserProfile`.
pub fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character only: `UserProfile` -> `userProfile`.
pub fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn kebab_case(name: &str) -> String {
    split_case_boundaries(name, "-")
}

pub fn snake_case(name: &str) -> String {
    split_case_boundaries(name, "_")
}

/// Upper-cases the whole name without inserting separators.
pub fn upper_snake_case(name: &str) -> String {
    name.to_uppercase()
}

fn split_case_boundaries(name: &str, separator: &str) -> String {
    CASE_BOUNDARY
        .replace_all(name, format!("${{1}}{}${{2}}", separator).as_str())
        .to_lowercase()
}
