//! A Storybuilder project on disk.
//!
//! ```text
//! project.yml  book.yml  order.yml
//! chapters/  episodes/  scenes/  notes/
//! persons/  stages/  items/  words/
//! trash/  build/
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use sb_core::data::{NamedData, from_yaml};
use sb_core::{
    BookData, ChapterData, EntityKind, EpisodeData, ItemData, NodeKind, OrderTree, OutputKind,
    PersonData, SceneData, StageData, StoryError, StoryResult, WordData,
};

use crate::config::ProjectConfig;
use crate::source::{OutputSink, ProjectSource};

/// Project settings file; its presence marks a project root.
pub const PROJECT_FILE: &str = "project.yml";
/// Book document.
pub const BOOK_FILE: &str = "book.yml";
/// Order document.
pub const ORDER_FILE: &str = "order.yml";
/// Where deleted files are moved.
pub const TRASH_DIR: &str = "trash";
/// Where rendered artifacts are written.
pub const BUILD_DIR: &str = "build";
/// Id of the files created by `init`.
pub const DEFAULT_ID: &str = "main";

const PLOT_TEMPLATE: &str = "plot:
  setup: \"\"
  tp1st: \"\"
  develop: \"\"
  tp2nd: \"\"
  climax: \"\"
  resolve: \"\"
";

/// Kinds of per-id project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `chapters/<id>.yml`
    Chapter,
    /// `episodes/<id>.yml`
    Episode,
    /// `scenes/<id>.md`
    Scene,
    /// `notes/<id>.md`
    Note,
    /// `persons/<id>.yml`
    Person,
    /// `stages/<id>.yml`
    Stage,
    /// `items/<id>.yml`
    Item,
    /// `words/<id>.yml`
    Word,
}

impl FileKind {
    /// Every kind, in directory listing order.
    pub const ALL: [FileKind; 8] = [
        Self::Chapter,
        Self::Episode,
        Self::Scene,
        Self::Note,
        Self::Person,
        Self::Stage,
        Self::Item,
        Self::Word,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Episode => "episode",
            Self::Scene => "scene",
            Self::Note => "note",
            Self::Person => "person",
            Self::Stage => "stage",
            Self::Item => "item",
            Self::Word => "word",
        }
    }

    /// Directory relative to the project root.
    pub fn dir(self) -> &'static str {
        match self {
            Self::Chapter => "chapters",
            Self::Episode => "episodes",
            Self::Scene => "scenes",
            Self::Note => "notes",
            Self::Person => "persons",
            Self::Stage => "stages",
            Self::Item => "items",
            Self::Word => "words",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Scene | Self::Note => "md",
            _ => "yml",
        }
    }

    /// The order-tree level, for kinds that appear in the order document.
    pub fn node_kind(self) -> Option<NodeKind> {
        match self {
            Self::Chapter => Some(NodeKind::Chapter),
            Self::Episode => Some(NodeKind::Episode),
            Self::Scene => Some(NodeKind::Scene),
            _ => None,
        }
    }

    /// The file kind holding entities of `kind`.
    pub fn of_entity(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Person => Self::Person,
            EntityKind::Stage => Self::Stage,
            EntityKind::Item => Self::Item,
            EntityKind::Word => Self::Word,
        }
    }

    /// Initial contents of a new file with the given id.
    pub fn template(self, id: &str) -> String {
        match self {
            Self::Chapter | Self::Episode => {
                format!("title: {}\noutline: \"\"\n{PLOT_TEMPLATE}", quoted(id))
            }
            Self::Scene => format!(
                "---\ntitle: {}\noutline: \"\"\ncamera: \"\"\nstage: \"\"\nyear: \"\"\n\
                 date: \"\"\ntime: \"\"\n{PLOT_TEMPLATE}---\n\n",
                quoted(id)
            ),
            Self::Note => format!("---\ntitle: {}\n---\n\n", quoted(id)),
            Self::Person => format!(
                "name: {}\nfullname: \"\"\ncalling:\n  me: 私\n",
                quoted(id)
            ),
            Self::Stage | Self::Item | Self::Word => format!("name: {}\n", quoted(id)),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A project directory.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    /// Open an existing project. Fails if `root` has no `project.yml`.
    pub fn open(root: impl Into<PathBuf>) -> StoryResult<Self> {
        let root = root.into();
        if !root.join(PROJECT_FILE).is_file() {
            return Err(StoryError::not_found("project", root.display().to_string()));
        }
        Ok(Self { root })
    }

    /// Create a new project with every directory and a `main` file of each kind,
    /// already linked into the order document.
    pub fn init(root: impl Into<PathBuf>, title: &str) -> StoryResult<Self> {
        let root = root.into();
        let project_file = root.join(PROJECT_FILE);
        if project_file.exists() {
            return Err(StoryError::already_exists(
                "project",
                root.display().to_string(),
            ));
        }
        let project = Self { root };
        project.create_dir(&project.root)?;
        for kind in FileKind::ALL {
            project.create_dir(&project.root.join(kind.dir()))?;
        }
        project.create_dir(&project.root.join(TRASH_DIR))?;

        write_file(
            &project_file,
            &ProjectConfig::new(title).to_yaml(&project_file)?,
        )?;
        let book = project.book_path();
        if !book.exists() {
            write_file(
                &book,
                &format!("title: {}\noutline: \"\"\n{PLOT_TEMPLATE}", quoted(title)),
            )?;
        }
        if !project.order_path().exists() {
            let order = OrderTree::new()
                .insert_chapter(DEFAULT_ID)?
                .insert_episode(DEFAULT_ID, DEFAULT_ID)?
                .insert_scene(DEFAULT_ID, DEFAULT_ID)?;
            project.save_order(&order)?;
        }
        for kind in FileKind::ALL {
            if !project.exists(kind, DEFAULT_ID) {
                project.add(kind, DEFAULT_ID)?;
            }
        }
        tracing::debug!(root = %project.root.display(), "project initialized");
        Ok(project)
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `book.yml`.
    pub fn book_path(&self) -> PathBuf {
        self.root.join(BOOK_FILE)
    }

    /// `order.yml`.
    pub fn order_path(&self) -> PathBuf {
        self.root.join(ORDER_FILE)
    }

    /// `build/`.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// Path of the file for `id`.
    pub fn path(&self, kind: FileKind, id: &str) -> PathBuf {
        self.root
            .join(kind.dir())
            .join(format!("{id}.{}", kind.extension()))
    }

    /// Whether the file for `id` exists.
    pub fn exists(&self, kind: FileKind, id: &str) -> bool {
        self.path(kind, id).is_file()
    }

    /// Parse `project.yml`.
    pub fn config(&self) -> StoryResult<ProjectConfig> {
        let path = self.root.join(PROJECT_FILE);
        ProjectConfig::from_yaml(&path, &read_file(&path)?)
    }

    /// Raw text of the order document.
    pub fn order_text(&self) -> StoryResult<String> {
        read_file(&self.order_path())
    }

    /// Write the order document.
    pub fn save_order(&self, order: &OrderTree) -> StoryResult<()> {
        let path = self.order_path();
        write_file(&path, &order.to_yaml(&path)?)
    }

    /// Sorted ids of every file of `kind`. A missing directory lists nothing.
    pub fn list(&self, kind: FileKind) -> StoryResult<Vec<String>> {
        let dir = self.root.join(kind.dir());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|source| StoryError::Io {
            path: dir.clone(),
            source,
        })?;
        let mut ids: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().is_some_and(|ext| ext == kind.extension()))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Create a new file from its template.
    pub fn add(&self, kind: FileKind, id: &str) -> StoryResult<PathBuf> {
        validate_id(kind, id)?;
        let path = self.path(kind, id);
        if path.exists() {
            return Err(StoryError::already_exists(kind.name(), id));
        }
        self.create_dir(&self.root.join(kind.dir()))?;
        write_file(&path, &kind.template(id))?;
        tracing::debug!(%kind, id, "file added");
        Ok(path)
    }

    /// Move a file into `trash/<dir>/`, replacing an earlier trashed copy.
    pub fn delete(&self, kind: FileKind, id: &str) -> StoryResult<PathBuf> {
        let path = self.path(kind, id);
        if !path.is_file() {
            return Err(StoryError::not_found(kind.name(), id));
        }
        let trash = self.root.join(TRASH_DIR).join(kind.dir());
        self.create_dir(&trash)?;
        let target = trash.join(format!("{id}.{}", kind.extension()));
        fs::rename(&path, &target).map_err(|source| StoryError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(%kind, id, "file moved to trash");
        Ok(target)
    }

    /// Rename a file. Chapters, episodes and scenes are renamed in the order
    /// document as well.
    pub fn rename(&self, kind: FileKind, old: &str, new: &str) -> StoryResult<()> {
        validate_id(kind, new)?;
        let from = self.path(kind, old);
        if !from.is_file() {
            return Err(StoryError::not_found(kind.name(), old));
        }
        let to = self.path(kind, new);
        if to.exists() {
            return Err(StoryError::already_exists(kind.name(), new));
        }
        let renamed_order = match kind.node_kind() {
            Some(node) => {
                let order = self.load_order()?;
                order
                    .contains(node, old)
                    .then(|| order.rename(node, old, new))
                    .transpose()?
            }
            None => None,
        };

        move_file(&from, &to)?;
        let saved = renamed_order.map_or(Ok(()), |order| self.save_order(&order));
        if let Err(err) = saved {
            if let Err(undo) = move_file(&to, &from) {
                tracing::warn!(error = %undo, "could not restore renamed file");
            }
            return Err(err);
        }
        tracing::debug!(%kind, old, new, "file renamed");
        Ok(())
    }

    /// Permanently remove everything in `trash/`. Returns the number of files removed.
    pub fn clear_trash(&self) -> StoryResult<usize> {
        let trash = self.root.join(TRASH_DIR);
        if !trash.is_dir() {
            return Ok(0);
        }
        let count = count_files(&trash)?;
        fs::remove_dir_all(&trash).map_err(|source| StoryError::Io {
            path: trash.clone(),
            source,
        })?;
        self.create_dir(&trash)?;
        Ok(count)
    }

    fn create_dir(&self, dir: &Path) -> StoryResult<()> {
        fs::create_dir_all(dir).map_err(|source| StoryError::Io {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn read_node(&self, kind: FileKind, id: &str) -> StoryResult<(PathBuf, String)> {
        let path = self.path(kind, id);
        if !path.is_file() {
            return Err(StoryError::not_found(kind.name(), id));
        }
        let text = read_file(&path)?;
        Ok((path, text))
    }

    fn load_yaml_node<T: serde::de::DeserializeOwned>(
        &self,
        kind: FileKind,
        id: &str,
    ) -> StoryResult<T> {
        let (path, text) = self.read_node(kind, id)?;
        from_yaml(&path, &text)
    }
}

impl ProjectSource for ProjectDir {
    fn load_order(&self) -> StoryResult<OrderTree> {
        let path = self.order_path();
        if !path.is_file() {
            return Err(StoryError::not_found("order", ORDER_FILE));
        }
        OrderTree::from_yaml(&read_file(&path)?)
    }

    fn load_book(&self) -> StoryResult<BookData> {
        let path = self.book_path();
        if !path.is_file() {
            return Err(StoryError::not_found("book", BOOK_FILE));
        }
        from_yaml(&path, &read_file(&path)?)
    }

    fn load_chapter(&self, id: &str) -> StoryResult<ChapterData> {
        self.load_yaml_node(FileKind::Chapter, id)
    }

    fn load_episode(&self, id: &str) -> StoryResult<EpisodeData> {
        self.load_yaml_node(FileKind::Episode, id)
    }

    fn load_scene(&self, id: &str) -> StoryResult<SceneData> {
        let (path, text) = self.read_node(FileKind::Scene, id)?;
        SceneData::from_markdown(&path, &text)
    }

    fn load_person(&self, id: &str) -> StoryResult<PersonData> {
        self.load_yaml_node(FileKind::Person, id)
    }

    fn load_stage(&self, id: &str) -> StoryResult<StageData> {
        self.load_yaml_node::<NamedData>(FileKind::Stage, id)
    }

    fn load_item(&self, id: &str) -> StoryResult<ItemData> {
        self.load_yaml_node::<NamedData>(FileKind::Item, id)
    }

    fn load_word(&self, id: &str) -> StoryResult<WordData> {
        self.load_yaml_node::<NamedData>(FileKind::Word, id)
    }

    fn list_entities(&self, kind: EntityKind) -> StoryResult<Vec<String>> {
        self.list(FileKind::of_entity(kind))
    }
}

impl OutputSink for ProjectDir {
    fn persist(&mut self, kind: OutputKind, lines: &[String]) -> StoryResult<()> {
        let dir = self.build_dir();
        self.create_dir(&dir)?;
        let path = dir.join(format!("{}.md", kind.name()));
        write_file(&path, &lines.concat())?;
        tracing::debug!(%kind, path = %path.display(), "artifact written");
        Ok(())
    }
}

fn move_file(from: &Path, to: &Path) -> StoryResult<()> {
    fs::rename(from, to).map_err(|source| StoryError::Io {
        path: from.to_path_buf(),
        source,
    })
}

/// YAML single-quoted scalar.
fn quoted(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn validate_id(kind: FileKind, id: &str) -> StoryResult<()> {
    let bad = id.is_empty()
        || id.starts_with('.')
        || id.contains(['/', '\\'])
        || id.chars().any(char::is_whitespace);
    if bad {
        return Err(StoryError::InvalidStructure(format!(
            "invalid {kind} id: \"{id}\""
        )));
    }
    Ok(())
}

fn read_file(path: &Path) -> StoryResult<String> {
    fs::read_to_string(path).map_err(|source| StoryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> StoryResult<()> {
    fs::write(path, contents).map_err(|source| StoryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn count_files(dir: &Path) -> StoryResult<usize> {
    let entries = fs::read_dir(dir).map_err(|source| StoryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut count = 0;
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            count += count_files(&path)?;
        } else {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn project() -> (TempDir, ProjectDir) {
        let tmp = TempDir::new().unwrap();
        let project = ProjectDir::init(tmp.path().join("story"), "港の物語").unwrap();
        (tmp, project)
    }

    #[test]
    fn init_creates_layout() {
        let (_tmp, project) = project();
        for kind in FileKind::ALL {
            assert!(project.exists(kind, DEFAULT_ID), "missing main {kind}");
        }
        assert!(project.root().join(TRASH_DIR).is_dir());
        assert_eq!(project.config().unwrap().title, "港の物語");
        assert_eq!(project.load_book().unwrap().title, "港の物語");
        let order = project.load_order().unwrap();
        assert!(order.contains(NodeKind::Scene, DEFAULT_ID));
    }

    #[test]
    fn init_twice_fails() {
        let (_tmp, project) = project();
        let err = ProjectDir::init(project.root(), "again").unwrap_err();
        assert!(matches!(err, StoryError::AlreadyExists { kind: "project", .. }));
    }

    #[test]
    fn open_requires_project_file() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            ProjectDir::open(tmp.path()),
            Err(StoryError::NotFound { kind: "project", .. })
        ));
    }

    #[test]
    fn templates_load() {
        let (_tmp, project) = project();
        assert_eq!(project.load_chapter("main").unwrap().title, "main");
        assert_eq!(project.load_episode("main").unwrap().title, "main");
        let scene = project.load_scene("main").unwrap();
        assert_eq!(scene.title, "main");
        assert_eq!(scene.body, vec![""]);
        let person = project.load_person("main").unwrap();
        assert_eq!(person.calling.get("me").map(String::as_str), Some("私"));
        assert_eq!(project.load_stage("main").unwrap().name, "main");
        assert_eq!(project.load_item("main").unwrap().name, "main");
        assert_eq!(project.load_word("main").unwrap().name, "main");
    }

    #[test]
    fn add_list_and_duplicate() {
        let (_tmp, project) = project();
        project.add(FileKind::Person, "taro").unwrap();
        project.add(FileKind::Person, "hana").unwrap();
        assert_eq!(
            project.list(FileKind::Person).unwrap(),
            vec!["hana", "main", "taro"]
        );
        assert!(matches!(
            project.add(FileKind::Person, "taro"),
            Err(StoryError::AlreadyExists { .. })
        ));
        assert!(project.add(FileKind::Word, "bad id").is_err());
        assert!(project.add(FileKind::Word, "../escape").is_err());
    }

    #[test]
    fn delete_moves_to_trash_and_clear_empties_it() {
        let (_tmp, project) = project();
        let trashed = project.delete(FileKind::Note, "main").unwrap();
        assert!(trashed.is_file());
        assert!(!project.exists(FileKind::Note, "main"));
        assert!(matches!(
            project.delete(FileKind::Note, "main"),
            Err(StoryError::NotFound { .. })
        ));
        assert_eq!(project.clear_trash().unwrap(), 1);
        assert!(!trashed.exists());
        assert_eq!(project.clear_trash().unwrap(), 0);
    }

    #[test]
    fn rename_updates_order() {
        let (_tmp, project) = project();
        project.rename(FileKind::Scene, "main", "opening").unwrap();
        assert!(project.exists(FileKind::Scene, "opening"));
        let order = project.load_order().unwrap();
        assert!(order.contains(NodeKind::Scene, "opening"));
        assert!(!order.contains(NodeKind::Scene, "main"));
    }

    #[test]
    fn rename_with_broken_order_moves_nothing() {
        let (_tmp, project) = project();
        fs::write(project.order_path(), "chapters: []\n").unwrap();
        assert!(matches!(
            project.rename(FileKind::Scene, "main", "opening"),
            Err(StoryError::InvalidStructure(_))
        ));
        assert!(project.exists(FileKind::Scene, "main"));
        assert!(!project.exists(FileKind::Scene, "opening"));
    }

    #[test]
    fn rename_conflicts() {
        let (_tmp, project) = project();
        project.add(FileKind::Stage, "harbor").unwrap();
        assert!(matches!(
            project.rename(FileKind::Stage, "main", "harbor"),
            Err(StoryError::AlreadyExists { .. })
        ));
        assert!(matches!(
            project.rename(FileKind::Stage, "nowhere", "x"),
            Err(StoryError::NotFound { .. })
        ));
    }

    #[test]
    fn quoted_titles_survive_yaml() {
        let tmp = TempDir::new().unwrap();
        let project = ProjectDir::init(tmp.path(), "It's: a #test").unwrap();
        assert_eq!(project.load_book().unwrap().title, "It's: a #test");
    }

    #[test]
    fn missing_node_is_not_found() {
        let (_tmp, project) = project();
        assert!(matches!(
            project.load_scene("ghost"),
            Err(StoryError::NotFound { kind: "scene", .. })
        ));
    }

    #[test]
    fn persist_writes_build_files() {
        let (_tmp, mut project) = project();
        project
            .persist_novel(&["a\n".to_string(), "b\n".to_string()])
            .unwrap();
        let text = fs::read_to_string(project.build_dir().join("novel.md")).unwrap();
        assert_eq!(text, "a\nb\n");
    }
}
