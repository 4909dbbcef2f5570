use log::{debug, error};
use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::config::{TemplateDescriptor, TemplateSet};
use crate::error::ScaffoldError;
use crate::renderer;
use crate::resolver::resolve_output;

/// What happened to one (module, template) pair.
#[derive(Debug)]
pub enum GenerationOutcome {
    Generated(PathBuf),
    /// Dry run: the file would have been written.
    Planned(PathBuf),
    SkippedExcluded,
    SkippedExists(PathBuf),
    Failed(ScaffoldError),
}

impl GenerationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, GenerationOutcome::Failed(_))
    }
}

impl fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationOutcome::Generated(path) => write!(f, "generated {}", path.display()),
            GenerationOutcome::Planned(path) => write!(f, "would generate {}", path.display()),
            GenerationOutcome::SkippedExcluded => write!(f, "skipped (excluded)"),
            GenerationOutcome::SkippedExists(path) => {
                write!(f, "skipped (exists) {}", path.display())
            }
            GenerationOutcome::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}

/// An outcome tagged with the template it belongs to.
#[derive(Debug)]
pub struct TemplateOutcome {
    pub template: String,
    pub outcome: GenerationOutcome,
}

/// Result of [`write_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    Skipped,
}

/// Writes `content` to `path` unless something is already there. Parent
/// directories are created as needed.
pub fn write_if_absent(path: &Path, content: &str) -> Result<WriteResult, ScaffoldError> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    create_new(path, content).map_err(|source| ScaffoldError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates `path` with `content`, refusing to open a file that already
/// exists. The check and the create are a single `open` call.
fn create_new(path: &Path, content: &str) -> io::Result<WriteResult> {
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(WriteResult::Skipped),
        Err(e) => return Err(e),
    };
    file.write_all(content.as_bytes())?;
    Ok(WriteResult::Written)
}

/// Ensures that the specified directory exists, creating it if necessary.
fn ensure_dir_exists(path: &Path) -> Result<(), ScaffoldError> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|source| ScaffoldError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Generates the files of a module from a [`TemplateSet`].
///
/// Existing files are never overwritten, so running it again for the same
/// module only fills in what is missing.
pub struct FileGenerator<'a> {
    template_set: &'a TemplateSet,
    dry_run: bool,
}

impl<'a> FileGenerator<'a> {
    pub fn new(template_set: &'a TemplateSet) -> Self {
        Self {
            template_set,
            dry_run: false,
        }
    }

    /// In dry-run mode nothing is created on disk; files that would be
    /// written are reported as `Planned`.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn template_set(&self) -> &TemplateSet {
        self.template_set
    }

    /// Generates one template for one module.
    ///
    /// # Arguments
    ///
    /// * `module_name` - The module being scaffolded.
    /// * `template_id` - Key of the template in the template set.
    /// * `descriptor` - Output rules for the template.
    ///
    /// # Returns
    ///
    /// The outcome for this pair. Errors never escape; they are returned as
    /// `GenerationOutcome::Failed`.
    pub fn generate(
        &self,
        module_name: &str,
        template_id: &str,
        descriptor: &TemplateDescriptor,
    ) -> GenerationOutcome {
        if self.template_set.exclusions.excluded(module_name, template_id) {
            debug!("'{}' is excluded for module '{}'", template_id, module_name);
            return GenerationOutcome::SkippedExcluded;
        }
        match self.generate_file(module_name, template_id, descriptor) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{}/{}: {}", module_name, template_id, e);
                GenerationOutcome::Failed(e)
            }
        }
    }

    /// Generates every configured template for `module_name`, in configured
    /// order. A failure does not stop the remaining templates.
    pub fn generate_all(&self, module_name: &str) -> Vec<TemplateOutcome> {
        self.template_set
            .templates
            .iter()
            .map(|(template_id, descriptor)| TemplateOutcome {
                template: template_id.clone(),
                outcome: self.generate(module_name, template_id, descriptor),
            })
            .collect()
    }

    fn generate_file(
        &self,
        module_name: &str,
        template_id: &str,
        descriptor: &TemplateDescriptor,
    ) -> Result<GenerationOutcome, ScaffoldError> {
        let template_path = self.template_set.template_path(template_id);
        let body = renderer::read_template(template_id, &template_path)?;

        let resolved = resolve_output(descriptor, module_name, &self.template_set.output_dir);
        let output_path = resolved.path();

        if !self.dry_run {
            // The filename may add segments of its own below `resolved.dir`.
            ensure_dir_exists(output_path.parent().unwrap_or(&resolved.dir))?;
        }
        if output_path.exists() {
            debug!("Keeping existing file {:?}", output_path);
            return Ok(GenerationOutcome::SkippedExists(output_path));
        }

        let rendered = renderer::render(&body, module_name);
        if self.dry_run {
            return Ok(GenerationOutcome::Planned(output_path));
        }
        let written =
            create_new(&output_path, &rendered).map_err(|source| ScaffoldError::WriteFailure {
                path: output_path.clone(),
                source,
            })?;
        match written {
            WriteResult::Written => {
                debug!("Wrote {:?}", output_path);
                Ok(GenerationOutcome::Generated(output_path))
            }
            WriteResult::Skipped => Ok(GenerationOutcome::SkippedExists(output_path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::exclusion::ExclusionTable;
    use indexmap::IndexMap;
    use tempfile::{tempdir, TempDir};

    /// A template set rooted in a temp dir with a body for every template.
    fn workspace() -> (TempDir, TemplateSet) {
        let dir = tempdir().unwrap();
        let mut set = defaults::template_set();
        set.templates_dir = dir.path().join("templates");
        set.output_dir = dir.path().join("src");
        fs::create_dir_all(&set.templates_dir).unwrap();
        for id in set.templates.keys() {
            fs::write(
                set.template_path(id),
                format!("// {} for {{{{ModuleName}}}}\n", id),
            )
            .unwrap();
        }
        (dir, set)
    }

    fn count(outcomes: &[TemplateOutcome], pred: fn(&GenerationOutcome) -> bool) -> usize {
        outcomes.iter().filter(|o| pred(&o.outcome)).count()
    }

    #[test]
    fn test_generate_writes_rendered_file() {
        let (_dir, set) = workspace();
        let generator = FileGenerator::new(&set);

        let outcome = generator.generate("userProfile", "service", &set.templates["service"]);
        let path = set.output_dir.join("userProfile/userProfile.service.ts");
        assert!(matches!(outcome, GenerationOutcome::Generated(ref p) if *p == path));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "// service for UserProfile\n"
        );
    }

    #[test]
    fn test_excluded_template_touches_nothing() {
        let (_dir, set) = workspace();
        let generator = FileGenerator::new(&set);

        let outcome = generator.generate("auth", "schema", &set.templates["schema"]);
        assert!(matches!(outcome, GenerationOutcome::SkippedExcluded));
        assert!(!set.output_dir.exists());
    }

    #[test]
    fn test_second_run_keeps_existing_file() {
        let (_dir, set) = workspace();
        let generator = FileGenerator::new(&set);
        let descriptor = &set.templates["create-dto"];

        let first = generator.generate("orders", "create-dto", descriptor);
        let path = set.output_dir.join("orders/dto/create-orders.dto.ts");
        assert!(matches!(first, GenerationOutcome::Generated(ref p) if *p == path));
        let after_first = fs::read_to_string(&path).unwrap();

        let second = generator.generate("orders", "create-dto", descriptor);
        assert!(matches!(second, GenerationOutcome::SkippedExists(ref p) if *p == path));
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_user_edits_survive_regeneration() {
        let (_dir, set) = workspace();
        let generator = FileGenerator::new(&set);
        generator.generate_all("orders");

        let path = set.output_dir.join("orders/orders.controller.ts");
        fs::write(&path, "edited by hand").unwrap();
        fs::write(set.template_path("controller"), "changed template").unwrap();

        let outcomes = generator.generate_all("orders");
        assert_eq!(count(&outcomes, |o| matches!(o, GenerationOutcome::SkippedExists(_))), 6);
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited by hand");
    }

    #[test]
    fn test_auth_generates_three_and_skips_three() {
        let (_dir, set) = workspace();
        let outcomes = FileGenerator::new(&set).generate_all("auth");

        let generated: Vec<&str> = outcomes
            .iter()
            .filter(|o| matches!(o.outcome, GenerationOutcome::Generated(_)))
            .map(|o| o.template.as_str())
            .collect();
        let excluded: Vec<&str> = outcomes
            .iter()
            .filter(|o| matches!(o.outcome, GenerationOutcome::SkippedExcluded))
            .map(|o| o.template.as_str())
            .collect();
        assert_eq!(generated, ["module", "controller", "service"]);
        assert_eq!(excluded, ["create-dto", "update-dto", "schema"]);
        assert!(!set.output_dir.join("auth/dto").exists());
    }

    #[test]
    fn test_missing_template_does_not_stop_siblings() {
        let (_dir, set) = workspace();
        fs::remove_file(set.template_path("controller")).unwrap();

        let outcomes = FileGenerator::new(&set).generate_all("orders");
        assert_eq!(outcomes.len(), 6);
        assert!(matches!(
            outcomes[1].outcome,
            GenerationOutcome::Failed(ScaffoldError::TemplateNotFound { .. })
        ));
        assert_eq!(count(&outcomes, |o| matches!(o, GenerationOutcome::Generated(_))), 5);
        assert!(!set.output_dir.join("orders/orders.controller.ts").exists());
    }

    #[test]
    fn test_write_failure_when_directory_is_a_file() {
        let (_dir, set) = workspace();
        fs::create_dir_all(set.output_dir.join("orders")).unwrap();
        fs::write(set.output_dir.join("orders/dto"), "not a directory").unwrap();

        let outcomes = FileGenerator::new(&set).generate_all("orders");
        for outcome in &outcomes {
            let failed = matches!(
                outcome.outcome,
                GenerationOutcome::Failed(ScaffoldError::WriteFailure { .. })
            );
            assert_eq!(failed, outcome.template.ends_with("-dto"), "{}", outcome.template);
        }
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_dir, set) = workspace();
        let outcomes = FileGenerator::new(&set).with_dry_run(true).generate_all("orders");

        assert_eq!(count(&outcomes, |o| matches!(o, GenerationOutcome::Planned(_))), 6);
        assert!(!set.output_dir.exists());
    }

    #[test]
    fn test_outcomes_follow_configured_order() {
        let (_dir, mut set) = workspace();
        let mut templates = IndexMap::new();
        templates.insert("service".to_string(), set.templates["service"].clone());
        templates.insert("module".to_string(), set.templates["module"].clone());
        set.templates = templates;
        set.exclusions = ExclusionTable::new();

        let outcomes = FileGenerator::new(&set).generate_all("auth");
        let ids: Vec<&str> = outcomes.iter().map(|o| o.template.as_str()).collect();
        assert_eq!(ids, ["service", "module"]);
    }

    #[test]
    fn test_create_new_never_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.module.ts");

        assert_eq!(create_new(&path, "first").unwrap(), WriteResult::Written);
        assert_eq!(create_new(&path, "second").unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_create_new_reports_missing_parent() {
        let dir = tempdir().unwrap();
        let result = create_new(&dir.path().join("missing/file.ts"), "content");
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_rooted_module_name_is_written_under_output_dir() {
        let (dir, set) = workspace();
        let generator = FileGenerator::new(&set);

        let outcome = generator.generate("/nested/orders", "module", &set.templates["module"]);
        let path = set.output_dir.join("nested/orders/nested/orders.module.ts");
        assert!(matches!(outcome, GenerationOutcome::Generated(ref p) if *p == path));
        assert!(path.starts_with(dir.path()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "// module for /nested/orders\n"
        );
    }

    #[test]
    fn test_write_if_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/file.txt");

        assert_eq!(write_if_absent(&path, "first").unwrap(), WriteResult::Written);
        assert_eq!(write_if_absent(&path, "second").unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }
}
