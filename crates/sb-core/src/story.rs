//! Build records: one loaded node per position in reading order.

use crate::data::{ContainerData, PlotData, SceneData};
use crate::order::NodeKind;

/// Loaded data of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Book, chapter or episode document.
    Container(ContainerData),
    /// Scene document.
    Scene(SceneData),
}

impl NodeData {
    /// Display title.
    pub fn title(&self) -> &str {
        match self {
            Self::Container(d) => &d.title,
            Self::Scene(d) => &d.title,
        }
    }

    /// One-paragraph summary.
    pub fn outline(&self) -> &str {
        match self {
            Self::Container(d) => &d.outline,
            Self::Scene(d) => &d.outline,
        }
    }

    /// Plot structure.
    pub fn plot(&self) -> &PlotData {
        match self {
            Self::Container(d) => &d.plot,
            Self::Scene(d) => &d.plot,
        }
    }
}

/// A node of the story in reading order, with its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    /// Level of the node.
    pub kind: NodeKind,
    /// Node id (`book` for the book).
    pub name: String,
    /// Loaded document.
    pub data: NodeData,
}

impl BuildRecord {
    /// The leading book record.
    pub fn book(data: ContainerData) -> Self {
        Self {
            kind: NodeKind::Book,
            name: NodeKind::Book.name().to_string(),
            data: NodeData::Container(data),
        }
    }

    /// A chapter or episode record.
    pub fn container(kind: NodeKind, name: impl Into<String>, data: ContainerData) -> Self {
        Self {
            kind,
            name: name.into(),
            data: NodeData::Container(data),
        }
    }

    /// A scene record.
    pub fn scene(name: impl Into<String>, data: SceneData) -> Self {
        Self {
            kind: NodeKind::Scene,
            name: name.into(),
            data: NodeData::Scene(data),
        }
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.data.title()
    }
}
