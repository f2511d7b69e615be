use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::error::{StoryError, StoryResult};
use crate::frontmatter;

/// The five-part plot structure attached to books, chapters, episodes and scenes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlotData {
    /// Opening situation.
    #[serde(default, deserialize_with = "scalar")]
    pub setup: String,
    /// First turning point.
    #[serde(default, deserialize_with = "scalar")]
    pub tp1st: String,
    /// Development.
    #[serde(default, deserialize_with = "scalar")]
    pub develop: String,
    /// Second turning point.
    #[serde(default, deserialize_with = "scalar")]
    pub tp2nd: String,
    /// Climax.
    #[serde(default, deserialize_with = "scalar")]
    pub climax: String,
    /// Resolution.
    #[serde(default, deserialize_with = "scalar")]
    pub resolve: String,
}

impl PlotData {
    /// The parts in story order.
    pub fn parts(&self) -> [&str; 6] {
        [
            self.setup.as_str(),
            self.tp1st.as_str(),
            self.develop.as_str(),
            self.tp2nd.as_str(),
            self.climax.as_str(),
            self.resolve.as_str(),
        ]
    }
}

/// Data shared by the book, chapter and episode documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContainerData {
    /// Display title.
    #[serde(deserialize_with = "scalar")]
    pub title: String,
    /// One-paragraph summary.
    #[serde(default, deserialize_with = "scalar")]
    pub outline: String,
    /// Plot structure.
    #[serde(default, deserialize_with = "null_default")]
    pub plot: PlotData,
}

/// `book.yml`.
pub type BookData = ContainerData;
/// `chapters/<id>.yml`.
pub type ChapterData = ContainerData;
/// `episodes/<id>.yml`.
pub type EpisodeData = ContainerData;

/// A scene document: front matter plus markup body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SceneData {
    /// Display title.
    #[serde(deserialize_with = "scalar")]
    pub title: String,
    /// One-paragraph summary.
    #[serde(default, deserialize_with = "scalar")]
    pub outline: String,
    /// Plot structure.
    #[serde(default, deserialize_with = "null_default")]
    pub plot: PlotData,
    /// Camera (point-of-view character).
    #[serde(default, deserialize_with = "scalar")]
    pub camera: String,
    /// Stage key.
    #[serde(default, deserialize_with = "scalar")]
    pub stage: String,
    /// In-story year.
    #[serde(default, deserialize_with = "scalar")]
    pub year: String,
    /// In-story date.
    #[serde(default, deserialize_with = "scalar")]
    pub date: String,
    /// Time of day.
    #[serde(default, deserialize_with = "scalar")]
    pub time: String,
    /// Markup lines outside the front matter.
    #[serde(skip)]
    pub body: Vec<String>,
    /// 1-based file line number of each `body` line.
    #[serde(skip)]
    pub line_numbers: Vec<usize>,
}

impl SceneData {
    /// Parse a scene document. The front matter must be present and carry a title.
    pub fn from_markdown(path: &Path, text: &str) -> StoryResult<Self> {
        let doc = frontmatter::split(text);
        let front = doc.front.ok_or_else(|| StoryError::InvalidData {
            path: path.to_path_buf(),
            message: "missing front matter".into(),
        })?;
        let mut scene: SceneData = from_yaml(path, &front)?;
        scene.body = doc.body;
        scene.line_numbers = doc.line_numbers;
        Ok(scene)
    }
}

/// A free-form note document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteData {
    /// Optional title.
    #[serde(default, deserialize_with = "scalar")]
    pub title: String,
    /// Lines outside the front matter.
    #[serde(skip)]
    pub body: Vec<String>,
}

impl NoteData {
    /// Parse a note. Front matter is optional.
    pub fn from_markdown(path: &Path, text: &str) -> StoryResult<Self> {
        let doc = frontmatter::split(text);
        let mut note: NoteData = match doc.front {
            Some(front) if !front.trim().is_empty() => from_yaml(path, &front)?,
            _ => NoteData::default(),
        };
        note.body = doc.body;
        Ok(note)
    }
}

/// `persons/<id>.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonData {
    /// Short display name.
    #[serde(deserialize_with = "scalar")]
    pub name: String,
    /// Full name as `last,first`.
    #[serde(default, deserialize_with = "scalar")]
    pub fullname: String,
    /// How this person addresses others (`me` is the self-reference).
    #[serde(default, deserialize_with = "calling_table")]
    pub calling: BTreeMap<String, String>,
}

/// `stages/`, `items/` and `words/` documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamedData {
    /// Display name.
    #[serde(deserialize_with = "scalar")]
    pub name: String,
}

/// `stages/<id>.yml`.
pub type StageData = NamedData;
/// `items/<id>.yml`.
pub type ItemData = NamedData;
/// `words/<id>.yml`.
pub type WordData = NamedData;

/// Kinds of reference entity that feed the name database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A character.
    Person,
    /// A place.
    Stage,
    /// An object.
    Item,
    /// A glossary term.
    Word,
}

impl EntityKind {
    /// All kinds in name-database population order.
    pub const ALL: [EntityKind; 4] = [Self::Word, Self::Item, Self::Stage, Self::Person];

    /// Lowercase name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Stage => "stage",
            Self::Item => "item",
            Self::Word => "word",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deserialize a YAML document, reporting failures against `path`.
pub fn from_yaml<T: DeserializeOwned>(path: &Path, source: &str) -> StoryResult<T> {
    serde_yaml::from_str(source).map_err(|e| StoryError::InvalidData {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Render a scalar YAML value as text. Null is empty.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value)
        .ok_or_else(|| serde::de::Error::custom("expected a string, number or boolean"))
}

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn calling_table<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, value)| {
            scalar_to_string(&value)
                .map(|v| (key.clone(), v))
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("calling \"{key}\" must be a scalar"))
                })
        })
        .collect()
}
