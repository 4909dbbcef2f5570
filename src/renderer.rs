use log::debug;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ScaffoldError;
use crate::naming::NamingVariants;

/// Matches anything shaped like a placeholder; unknown keys are left alone.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z][A-Za-z0-9_-]*)\}\}").expect("placeholder pattern is valid")
});

/// The placeholders recognized in template bodies and filename patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{{moduleName}}`, the name as given
    ModuleName,
    /// `{{ModuleName}}`
    Pascal,
    /// `{{module_name}}`
    Snake,
    /// `{{module-name}}`
    Kebab,
    /// `{{moduleNameCamel}}`
    Camel,
    /// `{{MODULE_NAME}}`
    UpperSnake,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Placeholder::ModuleName,
        Placeholder::Pascal,
        Placeholder::Snake,
        Placeholder::Kebab,
        Placeholder::Camel,
        Placeholder::UpperSnake,
    ];

    /// The key between the braces.
    pub fn key(self) -> &'static str {
        match self {
            Placeholder::ModuleName => "moduleName",
            Placeholder::Pascal => "ModuleName",
            Placeholder::Snake => "module_name",
            Placeholder::Kebab => "module-name",
            Placeholder::Camel => "moduleNameCamel",
            Placeholder::UpperSnake => "MODULE_NAME",
        }
    }

    /// The full token as written in a template.
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.key())
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    fn value(self, variants: &NamingVariants) -> &str {
        match self {
            Placeholder::ModuleName => &variants.canonical,
            Placeholder::Pascal => &variants.pascal,
            Placeholder::Snake => &variants.snake,
            Placeholder::Kebab => &variants.kebab,
            Placeholder::Camel => &variants.camel,
            Placeholder::UpperSnake => &variants.upper_snake,
        }
    }
}

/// Substitutes every recognized placeholder in `template` for `module_name`.
///
/// The text is scanned once; substituted values are never scanned again, so
/// a variant that itself looks like a token is emitted literally.
pub fn render(template: &str, module_name: &str) -> String {
    let variants = NamingVariants::from_name(module_name);
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match Placeholder::from_key(&caps[1]) {
            Some(placeholder) => placeholder.value(&variants).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Reads the template body stored at `template_path`.
///
/// # Arguments
///
/// * `template_id` - The identifier the body belongs to, used in errors.
/// * `template_path` - Location of the body in the template store.
///
/// # Returns
///
/// The raw body, or `ScaffoldError::TemplateNotFound` when it cannot be read.
pub fn read_template(
    template_id: &str,
    template_path: &Path,
) -> Result<String, ScaffoldError> {
    debug!("Reading template '{}' from {:?}", template_id, template_path);
    std::fs::read_to_string(template_path).map_err(|e| ScaffoldError::TemplateNotFound {
        template: template_id.to_string(),
        path: template_path.to_path_buf(),
        reason: e.to_string(),
    })
}
