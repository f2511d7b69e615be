//! The build pipeline: load, convert, render, persist.

use sb_core::names::{Callings, NameDatabase};
use sb_core::{
    BuildEvent, BuildRecord, EntityKind, NodeData, NodeKind, OutputKind, Reporter, StoryResult,
};
use sb_markup::{ActionRecord, InstructionProcessor, Target};
use sb_render::{NovelFormatter, ScriptFormatter};

use crate::config::BuildConfig;
use crate::source::{OutputSink, ProjectSource};

/// Name database and calling tables built from the reference entities.
#[derive(Debug, Clone, Default)]
pub struct References {
    /// Display names by tag key.
    pub names: NameDatabase,
    /// Per-person calling tables.
    pub callings: Callings,
}

/// Runs a full build against a [`ProjectSource`].
pub struct Builder<'a, S: ProjectSource> {
    source: &'a S,
    config: BuildConfig,
    reporter: &'a dyn Reporter,
}

impl<'a, S: ProjectSource> Builder<'a, S> {
    /// A builder reading from `source` and reporting through `reporter`.
    pub fn new(source: &'a S, config: BuildConfig, reporter: &'a dyn Reporter) -> Self {
        Self {
            source,
            config,
            reporter,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build every enabled artifact in order and hand each to `sink`.
    ///
    /// Returns the artifacts written. The first error stops the build; earlier
    /// artifacts stay persisted.
    pub fn build(&self, sink: &mut dyn OutputSink) -> StoryResult<Vec<OutputKind>> {
        let refs = self.references()?;
        let records = self.story_records()?;
        let mut built = Vec::new();

        for kind in OutputKind::ALL {
            if !self.config.enabled(kind) {
                continue;
            }
            self.reporter.report(&BuildEvent::PhaseStarted(kind));
            let lines = self.render(kind, &records, &refs)?;
            match kind {
                OutputKind::Outline => sink.persist_outline(&lines)?,
                OutputKind::Plot => sink.persist_plot(&lines)?,
                OutputKind::Script => sink.persist_script(&lines)?,
                OutputKind::Novel => sink.persist_novel(&lines)?,
            }
            self.reporter.report(&BuildEvent::PhaseFinished {
                kind,
                lines: lines.len(),
            });
            built.push(kind);
        }
        Ok(built)
    }

    /// Load every word, item, stage and person into the name database, and
    /// every person's calling table.
    pub fn references(&self) -> StoryResult<References> {
        let mut refs = References::default();
        for kind in EntityKind::ALL {
            let ids = self.source.list_entities(kind)?;
            for id in &ids {
                match kind {
                    EntityKind::Word => refs.names.add_word(id, &self.source.load_word(id)?.name),
                    EntityKind::Item => refs.names.add_item(id, &self.source.load_item(id)?.name),
                    EntityKind::Stage => {
                        refs.names.add_stage(id, &self.source.load_stage(id)?.name);
                    }
                    EntityKind::Person => {
                        let person = self.source.load_person(id)?;
                        refs.names.add_person(id, &person);
                        refs.callings.insert(id, person.calling);
                    }
                }
            }
            self.reporter.report(&BuildEvent::EntitiesLoaded {
                kind,
                count: ids.len(),
            });
        }
        Ok(refs)
    }

    /// The book record followed by one record per node in reading order.
    pub fn story_records(&self) -> StoryResult<Vec<BuildRecord>> {
        let order = self.source.load_order()?;
        let nodes = order.flatten();
        self.reporter.report(&BuildEvent::OrderLoaded { nodes: nodes.len() });

        let mut records = Vec::with_capacity(nodes.len() + 1);
        records.push(BuildRecord::book(self.source.load_book()?));
        for node in nodes {
            let record = match node.kind {
                NodeKind::Chapter => BuildRecord::container(
                    node.kind,
                    &node.id,
                    self.source.load_chapter(&node.id)?,
                ),
                NodeKind::Episode => BuildRecord::container(
                    node.kind,
                    &node.id,
                    self.source.load_episode(&node.id)?,
                ),
                NodeKind::Scene => BuildRecord::scene(&node.id, self.source.load_scene(&node.id)?),
                NodeKind::Book => continue,
            };
            self.reporter.report(&BuildEvent::NodeLoaded {
                kind: node.kind,
                id: node.id,
            });
            records.push(record);
        }
        Ok(records)
    }

    /// The action record stream for `target`: titles, scene metadata and the
    /// processed body of every scene.
    ///
    /// One instruction pass runs over the whole book, so paragraph mode and
    /// aliases carry from one scene into the next.
    pub fn action_records(
        &self,
        records: &[BuildRecord],
        target: Target,
        callings: &Callings,
    ) -> StoryResult<Vec<ActionRecord>> {
        let mut processor = InstructionProcessor::new(target);
        let mut out = Vec::new();
        for record in records {
            let title = record.title().to_string();
            match (&record.data, record.kind) {
                (_, NodeKind::Book) => out.push(ActionRecord::BookTitle(title)),
                (_, NodeKind::Chapter) => out.push(ActionRecord::ChapterTitle(title)),
                (_, NodeKind::Episode) => out.push(ActionRecord::EpisodeTitle(title)),
                (NodeData::Scene(scene), NodeKind::Scene) => {
                    out.push(ActionRecord::SceneTitle(title));
                    out.push(ActionRecord::SceneCamera(scene.camera.clone()));
                    out.push(ActionRecord::SceneStage(scene.stage.clone()));
                    out.push(ActionRecord::SceneYear(scene.year.clone()));
                    out.push(ActionRecord::SceneDate(scene.date.clone()));
                    out.push(ActionRecord::SceneTime(scene.time.clone()));
                    out.push(ActionRecord::SceneStart);
                    processor.push_scene(
                        &record.name,
                        &scene.body,
                        &scene.line_numbers,
                        &mut out,
                    )?;
                    out.push(ActionRecord::SceneEnd);
                }
                (NodeData::Container(_), NodeKind::Scene) => {
                    out.push(ActionRecord::SceneTitle(title));
                }
            }
        }
        Ok(sb_markup::apply_callings(
            out,
            callings,
            &self.config.tag_prefix,
            self.reporter,
        ))
    }

    /// Render one artifact, name substitution included.
    pub fn render(
        &self,
        kind: OutputKind,
        records: &[BuildRecord],
        refs: &References,
    ) -> StoryResult<Vec<String>> {
        let body = match kind {
            OutputKind::Outline => sb_render::outline(records),
            OutputKind::Plot => sb_render::plot(records),
            OutputKind::Script => {
                let actions = self.action_records(records, Target::Script, &refs.callings)?;
                let codes = sb_markup::convert_all(&actions, Target::Script);
                ScriptFormatter::new()
                    .with_detail(self.config.detail)
                    .with_speaker_prefix(&self.config.tag_prefix)
                    .format(&codes)
            }
            OutputKind::Novel => {
                let actions = self.action_records(records, Target::Novel, &refs.callings)?;
                let codes = sb_markup::convert_all(&actions, Target::Novel);
                NovelFormatter::new()
                    .with_scene_title(self.config.show_scene_title)
                    .format(&codes)
            }
        };
        Ok(sb_render::artifact(records, body)
            .iter()
            .map(|fragment| refs.names.substitute(fragment, &self.config.tag_prefix))
            .collect())
    }
}
