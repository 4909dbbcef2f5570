//! Scaffolds the source files of a named module from placeholder templates.
//!
//! A [`TemplateSet`] lists the templates to render, where their bodies live
//! and which modules skip which templates. [`FileGenerator`] renders one
//! module, [`BatchRunner`] renders many. Existing files are never
//! overwritten.

pub mod batch;
pub mod config;
pub mod defaults;
pub mod error;
pub mod exclusion;
pub mod generator;
pub mod naming;
pub mod renderer;
pub mod resolver;

pub use batch::{BatchReport, BatchRunner, ModuleReport, OutcomeSummary};
pub use config::{ConfigError, TemplateDescriptor, TemplateSet, UserConfig};
pub use error::ScaffoldError;
pub use exclusion::ExclusionTable;
pub use generator::{FileGenerator, GenerationOutcome, TemplateOutcome, WriteResult};
pub use naming::NamingVariants;
pub use renderer::{read_template, render, Placeholder};
pub use resolver::{resolve_output, ResolvedOutput};
