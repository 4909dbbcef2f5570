use log::{debug, info};

use crate::error::ScaffoldError;
use crate::generator::{FileGenerator, GenerationOutcome, TemplateOutcome};

/// Outcomes for one module, in template order.
#[derive(Debug)]
pub struct ModuleReport {
    pub module: String,
    pub outcomes: Vec<TemplateOutcome>,
}

/// Outcomes for a whole batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub modules: Vec<ModuleReport>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub generated: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn outcomes(&self) -> impl Iterator<Item = (&str, &TemplateOutcome)> {
        self.modules.iter().flat_map(|report| {
            report
                .outcomes
                .iter()
                .map(move |outcome| (report.module.as_str(), outcome))
        })
    }

    pub fn summary(&self) -> OutcomeSummary {
        let mut summary = OutcomeSummary::default();
        for (_, unit) in self.outcomes() {
            match unit.outcome {
                GenerationOutcome::Generated(_) => summary.generated += 1,
                GenerationOutcome::Planned(_) => summary.planned += 1,
                GenerationOutcome::SkippedExcluded | GenerationOutcome::SkippedExists(_) => {
                    summary.skipped += 1
                }
                GenerationOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Runs a [`FileGenerator`] over a list of module names.
pub struct BatchRunner<'a> {
    generator: FileGenerator<'a>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(generator: FileGenerator<'a>) -> Self {
        Self { generator }
    }

    /// Generates every template for every module, in the given order.
    ///
    /// Fails only when the templates directory is missing, and then before
    /// any module is processed. Per-template failures are part of the report.
    pub fn run<S: AsRef<str>>(&self, modules: &[S]) -> Result<BatchReport, ScaffoldError> {
        let templates_dir = &self.generator.template_set().templates_dir;
        if !templates_dir.is_dir() {
            return Err(ScaffoldError::TemplatesDirMissing(templates_dir.clone()));
        }

        let mut report = BatchReport::default();
        for module in modules {
            let module = module.as_ref();
            info!("Generating module '{}'", module);
            let outcomes = self.generator.generate_all(module);
            debug!("{} templates processed for '{}'", outcomes.len(), module);
            report.modules.push(ModuleReport {
                module: module.to_string(),
                outcomes,
            });
        }
        Ok(report)
    }
}
