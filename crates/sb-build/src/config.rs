//! Project and build configuration (`project.yml`).

use std::path::Path;

use sb_core::data::from_yaml;
use sb_core::tag::DEFAULT_PREFIX;
use sb_core::{OutputKind, StoryError, StoryResult};
use serde::{Deserialize, Serialize};

/// Which artifacts to build and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build `outline.md`.
    pub outline: bool,
    /// Build `plot.md`.
    pub plot: bool,
    /// Build `script.md`.
    pub script: bool,
    /// Build `novel.md`.
    pub novel: bool,
    /// Add year, date and camera to script scene headings.
    pub detail: bool,
    /// Show scene titles in the novel.
    pub show_scene_title: bool,
    /// Prefix that introduces a name tag.
    pub tag_prefix: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            outline: true,
            plot: true,
            script: true,
            novel: true,
            detail: false,
            show_scene_title: false,
            tag_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl BuildConfig {
    /// Enable or disable the outline.
    pub fn with_outline(mut self, on: bool) -> Self {
        self.outline = on;
        self
    }

    /// Enable or disable the plot.
    pub fn with_plot(mut self, on: bool) -> Self {
        self.plot = on;
        self
    }

    /// Enable or disable the script.
    pub fn with_script(mut self, on: bool) -> Self {
        self.script = on;
        self
    }

    /// Enable or disable the novel.
    pub fn with_novel(mut self, on: bool) -> Self {
        self.novel = on;
        self
    }

    /// Build exactly the given artifacts. An empty slice leaves the selection unchanged.
    pub fn with_only(self, kinds: &[OutputKind]) -> Self {
        if kinds.is_empty() {
            return self;
        }
        self.with_outline(kinds.contains(&OutputKind::Outline))
            .with_plot(kinds.contains(&OutputKind::Plot))
            .with_script(kinds.contains(&OutputKind::Script))
            .with_novel(kinds.contains(&OutputKind::Novel))
    }

    /// Set detailed script scene headings.
    pub fn with_detail(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }

    /// Set whether the novel shows scene titles.
    pub fn with_scene_title(mut self, show: bool) -> Self {
        self.show_scene_title = show;
        self
    }

    /// Set the tag prefix.
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Whether `kind` is selected.
    pub fn enabled(&self, kind: OutputKind) -> bool {
        match kind {
            OutputKind::Outline => self.outline,
            OutputKind::Plot => self.plot,
            OutputKind::Script => self.script,
            OutputKind::Novel => self.novel,
        }
    }
}

/// Contents of `project.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Working title.
    #[serde(default)]
    pub title: String,
    /// Project version.
    #[serde(default)]
    pub version: String,
    /// Copyright line.
    #[serde(default)]
    pub copyright: String,
    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

impl ProjectConfig {
    /// A fresh configuration for a new project.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: "0.1".to_string(),
            copyright: String::new(),
            build: BuildConfig::default(),
        }
    }

    /// Parse `project.yml` source. An empty document yields defaults.
    pub fn from_yaml(path: &Path, source: &str) -> StoryResult<Self> {
        if source.trim().is_empty() {
            return Ok(Self::new(""));
        }
        from_yaml(path, source)
    }

    /// Serialize for writing back to disk.
    pub fn to_yaml(&self, path: &Path) -> StoryResult<String> {
        serde_yaml::to_string(self).map_err(|source| StoryError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
