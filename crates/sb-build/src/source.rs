//! Seams between the build pipeline and storage.

use sb_core::{
    BookData, ChapterData, EntityKind, EpisodeData, ItemData, OrderTree, OutputKind, PersonData,
    SceneData, StageData, StoryResult, WordData,
};

/// Supplies project documents to the builder.
pub trait ProjectSource {
    /// The order tree.
    fn load_order(&self) -> StoryResult<OrderTree>;
    /// The book document.
    fn load_book(&self) -> StoryResult<BookData>;
    /// A chapter document.
    fn load_chapter(&self, id: &str) -> StoryResult<ChapterData>;
    /// An episode document.
    fn load_episode(&self, id: &str) -> StoryResult<EpisodeData>;
    /// A scene document with its markup body.
    fn load_scene(&self, id: &str) -> StoryResult<SceneData>;
    /// A person document.
    fn load_person(&self, id: &str) -> StoryResult<PersonData>;
    /// A stage document.
    fn load_stage(&self, id: &str) -> StoryResult<StageData>;
    /// An item document.
    fn load_item(&self, id: &str) -> StoryResult<ItemData>;
    /// A word document.
    fn load_word(&self, id: &str) -> StoryResult<WordData>;
    /// Ids of every entity of `kind`, sorted.
    fn list_entities(&self, kind: EntityKind) -> StoryResult<Vec<String>>;
}

/// Receives rendered artifacts.
pub trait OutputSink {
    /// Store the fragments of one artifact.
    fn persist(&mut self, kind: OutputKind, lines: &[String]) -> StoryResult<()>;

    /// Store the outline.
    fn persist_outline(&mut self, lines: &[String]) -> StoryResult<()> {
        self.persist(OutputKind::Outline, lines)
    }

    /// Store the plot.
    fn persist_plot(&mut self, lines: &[String]) -> StoryResult<()> {
        self.persist(OutputKind::Plot, lines)
    }

    /// Store the script.
    fn persist_script(&mut self, lines: &[String]) -> StoryResult<()> {
        self.persist(OutputKind::Script, lines)
    }

    /// Store the novel.
    fn persist_novel(&mut self, lines: &[String]) -> StoryResult<()> {
        self.persist(OutputKind::Novel, lines)
    }
}
