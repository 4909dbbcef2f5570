use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Per-template sets of module names the template must not be generated for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionTable(IndexMap<String, IndexSet<String>>);

impl ExclusionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `modules` to the exclusions of `template_id`.
    pub fn exclude<I, S>(mut self, template_id: &str, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .entry(template_id.to_string())
            .or_default()
            .extend(modules.into_iter().map(Into::into));
        self
    }

    /// Whether `template_id` is excluded for `module_name`. Templates without
    /// an entry apply to every module.
    pub fn excluded(&self, module_name: &str, template_id: &str) -> bool {
        self.0
            .get(template_id)
            .is_some_and(|modules| modules.contains(module_name))
    }

    pub fn template_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
