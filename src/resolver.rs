use std::path::{Component, Path, PathBuf};

use crate::config::TemplateDescriptor;
use crate::renderer;

/// Where a rendered template lands. Purely logical; nothing is touched on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    pub dir: PathBuf,
    pub filename: String,
}

impl ResolvedOutput {
    pub fn path(&self) -> PathBuf {
        let mut path = self.dir.clone();
        push_relative(&mut path, &self.filename);
        path
    }
}

/// Appends `segment` under `base`. A leading root or drive prefix is
/// dropped so the result always stays below `base`.
fn push_relative(base: &mut PathBuf, segment: &str) {
    for component in Path::new(segment).components() {
        if !matches!(component, Component::RootDir | Component::Prefix(_)) {
            base.push(component);
        }
    }
}

/// Computes `output_dir/<module>[/<subdir>]/<filename>` for one template.
///
/// The filename is the descriptor's pattern rendered for `module_name`, or
/// `<module>.<extension>` when no pattern is configured.
pub fn resolve_output(
    descriptor: &TemplateDescriptor,
    module_name: &str,
    output_dir: &Path,
) -> ResolvedOutput {
    let mut dir = output_dir.to_path_buf();
    push_relative(&mut dir, module_name);
    if let Some(subdir) = &descriptor.subdir {
        push_relative(&mut dir, subdir);
    }
    let filename = match &descriptor.filename_pattern {
        Some(pattern) => renderer::render(pattern, module_name),
        None => format!("{}.{}", module_name, descriptor.extension),
    };
    ResolvedOutput { dir, filename }
}
