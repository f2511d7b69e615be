use std::fs;
use std::path::Path;

use colored::Colorize;
use sb_build::{BuildConfig, Builder, FileKind, ProjectDir};
use sb_core::{OutputKind, StoryError, TracingReporter};
use sb_markup::Diagnostic;
use sb_markup::diagnostics::render_diagnostics;

/// Artifact flags from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub outline: bool,
    pub plot: bool,
    pub script: bool,
    pub novel: bool,
    pub detail: bool,
}

impl Selection {
    /// Override `config`: any artifact flag restricts the build to the flagged
    /// artifacts, and `--detail` turns detailed headings on.
    fn apply(self, config: BuildConfig) -> BuildConfig {
        let kinds: Vec<OutputKind> = [
            (self.outline, OutputKind::Outline),
            (self.plot, OutputKind::Plot),
            (self.script, OutputKind::Script),
            (self.novel, OutputKind::Novel),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
        .collect();
        let config = config.with_only(&kinds);
        if self.detail {
            config.with_detail(true)
        } else {
            config
        }
    }
}

pub fn run(dir: &Path, selection: Selection) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let config = project.config().map_err(|e| e.to_string())?;
    let build = selection.apply(config.build);

    let mut sink = project.clone();
    let builder = Builder::new(&project, build, &TracingReporter);
    match builder.build(&mut sink) {
        Ok(built) => {
            for kind in &built {
                let path = project.build_dir().join(format!("{}.md", kind.name()));
                println!("  {} {}", "Built".green().bold(), path.display());
            }
            if built.is_empty() {
                println!("  Nothing to build.");
            }
            Ok(())
        }
        Err(err) if print_diagnostic(&project, &err) => Err("build failed with errors".into()),
        Err(err) => Err(err.to_string()),
    }
}

/// Print a located markup error with source context. Returns `false` when
/// the error carries no scene location.
fn print_diagnostic(project: &ProjectDir, err: &StoryError) -> bool {
    let StoryError::InScene { scene, .. } = err else {
        return false;
    };
    let path = project.path(FileKind::Scene, scene);
    let Ok(source) = fs::read_to_string(&path) else {
        return false;
    };
    let Some(diagnostic) = Diagnostic::from_error(err, &source) else {
        return false;
    };
    let filename = path.display().to_string();
    eprint!("{}", render_diagnostics(&source, &filename, &[diagnostic]));
    true
}
