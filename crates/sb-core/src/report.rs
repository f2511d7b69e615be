//! Build progress reporting.
//!
//! Components that want to tell the outside world what they are doing take a
//! [`Reporter`] at construction instead of logging through a global.

use std::fmt;

use crate::data::EntityKind;
use crate::order::NodeKind;

/// The four rendered artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Titles and one-paragraph outlines per level.
    Outline,
    /// Titles and five-part plots per level.
    Plot,
    /// Screenplay-style rendering of every scene.
    Script,
    /// Prose rendering of every scene.
    Novel,
}

impl OutputKind {
    /// All artifacts in build order.
    pub const ALL: [OutputKind; 4] = [Self::Outline, Self::Plot, Self::Script, Self::Novel];

    /// Lowercase name, also used as the output file stem.
    pub fn name(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Plot => "plot",
            Self::Script => "script",
            Self::Novel => "novel",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that happened during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// Reference entities of one kind were added to the name database.
    EntitiesLoaded {
        /// Which kind.
        kind: EntityKind,
        /// How many files were read.
        count: usize,
    },
    /// The order document was read and flattened.
    OrderLoaded {
        /// Number of chapter, episode and scene nodes.
        nodes: usize,
    },
    /// A node document was read.
    NodeLoaded {
        /// Level of the node.
        kind: NodeKind,
        /// Node identifier.
        id: String,
    },
    /// An action's subject has no person file, so calling tags were not applied.
    NoCallingTable {
        /// The subject as written (after alias resolution).
        subject: String,
    },
    /// Rendering of an artifact began.
    PhaseStarted(OutputKind),
    /// An artifact was rendered and handed to the sink.
    PhaseFinished {
        /// Which artifact.
        kind: OutputKind,
        /// Number of output fragments written.
        lines: usize,
    },
}

/// Receives [`BuildEvent`]s.
pub trait Reporter {
    /// Record one event.
    fn report(&self, event: &BuildEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &BuildEvent) {
        match event {
            BuildEvent::EntitiesLoaded { kind, count } => {
                tracing::debug!(%kind, count, "entities loaded");
            }
            BuildEvent::OrderLoaded { nodes } => tracing::debug!(nodes, "order loaded"),
            BuildEvent::NodeLoaded { kind, id } => tracing::trace!(%kind, %id, "node loaded"),
            BuildEvent::NoCallingTable { subject } => {
                tracing::debug!(%subject, "no calling table for subject");
            }
            BuildEvent::PhaseStarted(kind) => tracing::info!(%kind, "build phase started"),
            BuildEvent::PhaseFinished { kind, lines } => {
                tracing::info!(%kind, lines, "build phase finished");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &BuildEvent) {}
}
