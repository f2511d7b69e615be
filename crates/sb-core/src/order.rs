use std::fmt;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{StoryError, StoryResult};

/// The structural level of a node in the order tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The whole book (root).
    Book,
    /// A chapter of the book.
    Chapter,
    /// An episode inside a chapter.
    Episode,
    /// A scene inside an episode.
    Scene,
}

impl NodeKind {
    /// The namespace prefix used for this kind in the order document.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Book => "book/",
            Self::Chapter => "chapter/",
            Self::Episode => "episode/",
            Self::Scene => "scene/",
        }
    }

    /// Lowercase name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Chapter => "chapter",
            Self::Episode => "episode",
            Self::Scene => "scene",
        }
    }

    /// Add this kind's namespace prefix to an identifier.
    pub fn qualify(self, id: &str) -> String {
        format!("{}{id}", self.prefix())
    }

    /// Strip this kind's namespace prefix from an order-document key.
    pub fn unqualify(self, key: &str) -> Option<&str> {
        key.strip_prefix(self.prefix()).filter(|id| !id.is_empty())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node reference produced by [`OrderTree::flatten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    /// Level of the node.
    pub kind: NodeKind,
    /// Identifier without namespace prefix.
    pub id: String,
}

impl NodeRef {
    fn new(kind: NodeKind, id: &str) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

/// An episode and its scenes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeEntry {
    /// Episode identifier.
    pub id: String,
    /// Scene identifiers in reading order.
    pub scenes: Vec<String>,
}

/// A chapter and its episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    /// Chapter identifier.
    pub id: String,
    /// Episodes in reading order.
    pub episodes: Vec<EpisodeEntry>,
}

/// The book's reading order: chapters → episodes → scenes.
///
/// Every editing operation returns a new tree and leaves `self` untouched,
/// so a failed edit can never leave a half-modified tree behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderTree {
    chapters: Vec<ChapterEntry>,
}

impl OrderTree {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chapters in reading order.
    pub fn chapters(&self) -> &[ChapterEntry] {
        &self.chapters
    }

    /// Returns `true` if the id appears at the given level anywhere in the tree.
    pub fn contains(&self, kind: NodeKind, id: &str) -> bool {
        self.flatten().iter().any(|n| n.kind == kind && n.id == id)
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Append a chapter. Inserting an existing chapter is a no-op.
    pub fn insert_chapter(&self, id: &str) -> StoryResult<OrderTree> {
        let mut tree = self.clone();
        if !tree.chapters.iter().any(|c| c.id == id) {
            tree.chapters.push(ChapterEntry {
                id: id.to_string(),
                episodes: Vec::new(),
            });
        }
        Ok(tree)
    }

    /// Append an episode to a chapter.
    pub fn insert_episode(&self, id: &str, chapter: &str) -> StoryResult<OrderTree> {
        let mut tree = self.clone();
        let entry = tree
            .chapters
            .iter_mut()
            .find(|c| c.id == chapter)
            .ok_or_else(|| StoryError::not_found("chapter", chapter))?;
        if !entry.episodes.iter().any(|e| e.id == id) {
            entry.episodes.push(EpisodeEntry {
                id: id.to_string(),
                scenes: Vec::new(),
            });
        }
        Ok(tree)
    }

    /// Append a scene to an episode. Fails when the episode id appears under
    /// more than one chapter; use [`OrderTree::insert_scene_under`] then.
    pub fn insert_scene(&self, id: &str, episode: &str) -> StoryResult<OrderTree> {
        let mut owners = self
            .chapters
            .iter()
            .filter(|c| c.episodes.iter().any(|e| e.id == episode));
        let chapter = owners
            .next()
            .ok_or_else(|| StoryError::not_found("episode", episode))?;
        if owners.next().is_some() {
            return Err(StoryError::InvalidStructure(format!(
                "episode \"{episode}\" appears in more than one chapter; name the chapter"
            )));
        }
        let chapter = chapter.id.clone();
        self.insert_scene_under(id, &chapter, episode)
    }

    /// Append a scene to the episode `episode` of chapter `chapter`.
    pub fn insert_scene_under(
        &self,
        id: &str,
        chapter: &str,
        episode: &str,
    ) -> StoryResult<OrderTree> {
        let mut tree = self.clone();
        let entry = tree
            .chapters
            .iter_mut()
            .find(|c| c.id == chapter)
            .ok_or_else(|| StoryError::not_found("chapter", chapter))?
            .episodes
            .iter_mut()
            .find(|e| e.id == episode)
            .ok_or_else(|| StoryError::not_found("episode", episode))?;
        if !entry.scenes.iter().any(|s| s == id) {
            entry.scenes.push(id.to_string());
        }
        Ok(tree)
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Remove a chapter with all its episodes and scenes.
    pub fn remove_chapter(&self, id: &str) -> StoryResult<OrderTree> {
        if !self.chapters.iter().any(|c| c.id == id) {
            return Err(StoryError::not_found("chapter", id));
        }
        let mut tree = self.clone();
        tree.chapters.retain(|c| c.id != id);
        Ok(tree)
    }

    /// Remove every occurrence of an episode. Other chapters' episode lists
    /// are left as they are.
    pub fn remove_episode(&self, id: &str) -> StoryResult<OrderTree> {
        if !self.contains(NodeKind::Episode, id) {
            return Err(StoryError::not_found("episode", id));
        }
        let mut tree = self.clone();
        for chapter in &mut tree.chapters {
            chapter.episodes.retain(|e| e.id != id);
        }
        Ok(tree)
    }

    /// Remove every occurrence of a scene.
    pub fn remove_scene(&self, id: &str) -> StoryResult<OrderTree> {
        if !self.contains(NodeKind::Scene, id) {
            return Err(StoryError::not_found("scene", id));
        }
        let mut tree = self.clone();
        for episode in tree.chapters.iter_mut().flat_map(|c| c.episodes.iter_mut()) {
            episode.scenes.retain(|s| s != id);
        }
        Ok(tree)
    }

    /// Rename every occurrence of a node id at the given level.
    pub fn rename(&self, kind: NodeKind, old: &str, new: &str) -> StoryResult<OrderTree> {
        if !self.contains(kind, old) {
            return Err(StoryError::not_found(kind.name(), old));
        }
        let mut tree = self.clone();
        for chapter in &mut tree.chapters {
            if kind == NodeKind::Chapter && chapter.id == old {
                chapter.id = new.to_string();
            }
            for episode in &mut chapter.episodes {
                if kind == NodeKind::Episode && episode.id == old {
                    episode.id = new.to_string();
                }
                if kind == NodeKind::Scene {
                    for scene in episode.scenes.iter_mut().filter(|s| s.as_str() == old) {
                        *scene = new.to_string();
                    }
                }
            }
        }
        Ok(tree)
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// Pre-order traversal in reading order: each chapter, then each of its
    /// episodes followed by that episode's scenes.
    pub fn flatten(&self) -> Vec<NodeRef> {
        let mut nodes = Vec::new();
        for chapter in &self.chapters {
            nodes.push(NodeRef::new(NodeKind::Chapter, &chapter.id));
            for episode in &chapter.episodes {
                nodes.push(NodeRef::new(NodeKind::Episode, &episode.id));
                nodes.extend(
                    episode
                        .scenes
                        .iter()
                        .map(|s| NodeRef::new(NodeKind::Scene, s)),
                );
            }
        }
        nodes
    }

    // -----------------------------------------------------------------------
    // Serialized form
    // -----------------------------------------------------------------------

    /// Parse an order document.
    pub fn from_yaml(source: &str) -> StoryResult<OrderTree> {
        let doc: Value = serde_yaml::from_str(source)
            .map_err(|e| StoryError::InvalidStructure(format!("not a YAML document: {e}")))?;
        Self::from_value(&doc)
    }

    /// Build a tree from an already parsed order document.
    pub fn from_value(doc: &Value) -> StoryResult<OrderTree> {
        let book = doc
            .as_mapping()
            .and_then(|m| m.get("book"))
            .ok_or_else(|| StoryError::InvalidStructure("missing top-level `book` field".into()))?;

        let mut tree = OrderTree::new();
        for item in sequence_or_empty(book, "book")? {
            let (key, episodes) = single_entry(item, NodeKind::Chapter)?;
            let mut chapter = ChapterEntry {
                id: key,
                episodes: Vec::new(),
            };
            for ep_item in sequence_or_empty(episodes, &chapter.id)? {
                let (key, scenes) = single_entry(ep_item, NodeKind::Episode)?;
                if chapter.episodes.iter().any(|e| e.id == key) {
                    return Err(duplicate(NodeKind::Episode, &key, &chapter.id));
                }
                let mut episode = EpisodeEntry {
                    id: key,
                    scenes: Vec::new(),
                };
                for sc_item in sequence_or_empty(scenes, &episode.id)? {
                    let raw = sc_item.as_str().ok_or_else(|| {
                        StoryError::InvalidStructure(format!(
                            "scene entry under \"{}\" must be a string",
                            episode.id
                        ))
                    })?;
                    let id = unqualified(NodeKind::Scene, raw)?;
                    if episode.scenes.contains(&id) {
                        return Err(duplicate(NodeKind::Scene, &id, &episode.id));
                    }
                    episode.scenes.push(id);
                }
                chapter.episodes.push(episode);
            }
            if tree.chapters.iter().any(|c| c.id == chapter.id) {
                return Err(duplicate(NodeKind::Chapter, &chapter.id, "book"));
            }
            tree.chapters.push(chapter);
        }
        Ok(tree)
    }

    /// Serialize back into an order document. `path` names the file in errors.
    pub fn to_yaml(&self, path: &Path) -> StoryResult<String> {
        let chapters: Vec<Value> = self
            .chapters
            .iter()
            .map(|c| {
                let episodes: Vec<Value> = c
                    .episodes
                    .iter()
                    .map(|e| {
                        let scenes = e
                            .scenes
                            .iter()
                            .map(|s| Value::String(NodeKind::Scene.qualify(s)))
                            .collect();
                        keyed(NodeKind::Episode.qualify(&e.id), Value::Sequence(scenes))
                    })
                    .collect();
                keyed(NodeKind::Chapter.qualify(&c.id), Value::Sequence(episodes))
            })
            .collect();
        let doc = keyed("book".to_string(), Value::Sequence(chapters));
        serde_yaml::to_string(&doc).map_err(|source| StoryError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn keyed(key: String, value: Value) -> Value {
    let mut map = Mapping::new();
    map.insert(Value::String(key), value);
    Value::Mapping(map)
}

fn duplicate(kind: NodeKind, id: &str, owner: &str) -> StoryError {
    StoryError::InvalidStructure(format!("{kind} \"{id}\" appears twice under \"{owner}\""))
}

fn sequence_or_empty<'a>(value: &'a Value, owner: &str) -> StoryResult<&'a [Value]> {
    match value {
        Value::Null => Ok(&[]),
        Value::Sequence(items) => Ok(items.as_slice()),
        _ => Err(StoryError::InvalidStructure(format!(
            "entries of \"{owner}\" must be a list"
        ))),
    }
}

fn single_entry(item: &Value, kind: NodeKind) -> StoryResult<(String, &Value)> {
    let map = item.as_mapping().filter(|m| m.len() == 1).ok_or_else(|| {
        StoryError::InvalidStructure(format!("{kind} entry must be a single-key mapping"))
    })?;
    let (key, value) = map.iter().next().ok_or_else(|| {
        StoryError::InvalidStructure(format!("{kind} entry must be a single-key mapping"))
    })?;
    let key = key.as_str().ok_or_else(|| {
        StoryError::InvalidStructure(format!("{kind} key must be a string"))
    })?;
    Ok((unqualified(kind, key)?, value))
}

fn unqualified(kind: NodeKind, key: &str) -> StoryResult<String> {
    kind.unqualify(key).map(str::to_string).ok_or_else(|| {
        StoryError::InvalidStructure(format!(
            "expected a \"{}\" identifier, found \"{key}\"",
            kind.prefix()
        ))
    })
}
