use crate::config::{ChunkingConfig, DetectionConfig};
use crate::document::category::{Category, CategoryClassifier};
use crate::document::splitter::{
    BulletSplitter, ProblemSplitter, SemanticSplitter, SplitStrategy, TopicSplitter,
};
use serde::Serialize;
use tracing::debug;

/// A unit of ingested study material. Immutable once extracted;
/// classification only reads filename and text.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub text: String,
    pub category: Option<Category>,
}

impl Document {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            category: None,
        }
    }
}

/// The atomic unit handed to the indexing collaborator
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub source_category: Category,
    pub source_filename: String,
    pub sequence_index: usize,
    pub topic_label: Option<String>,
    pub char_count: usize,
}

/// Picks the strategy for a document's category and wraps the split
/// output with provenance. Pure adapter: never invents, drops or
/// reorders fragments.
pub struct ChunkDispatcher {
    classifier: CategoryClassifier,
    topic: TopicSplitter,
    problem: ProblemSplitter,
    bullet: BulletSplitter,
    semantic: SemanticSplitter,
}

impl ChunkDispatcher {
    pub fn new(chunking: &ChunkingConfig, detection: DetectionConfig) -> Self {
        Self {
            classifier: CategoryClassifier::new(detection),
            topic: TopicSplitter::new(chunking),
            problem: ProblemSplitter::new(chunking),
            bullet: BulletSplitter::new(chunking),
            semantic: SemanticSplitter::new(chunking),
        }
    }

    /// Total mapping: every category has a strategy, Unknown chunks
    /// semantically, so dispatch never fails.
    fn strategy_for(&self, category: Category) -> &dyn SplitStrategy {
        match category {
            Category::ExamQuestions => &self.topic,
            Category::Exercises => &self.problem,
            Category::LectureSlides => &self.bullet,
            Category::Practicum | Category::Unknown => &self.semantic,
        }
    }

    /// Chunk a document, classifying it first unless a category was
    /// already assigned. Empty text yields an empty list, never an error.
    pub fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let category = document
            .category
            .unwrap_or_else(|| self.classifier.classify(&document.filename, &document.text));

        if document.text.trim().is_empty() {
            return Vec::new();
        }

        let fragments = self.strategy_for(category).split(&document.text);

        debug!(
            "✂️  Split {} into {} fragments ({})",
            document.filename,
            fragments.len(),
            category.as_str()
        );

        fragments
            .into_iter()
            .enumerate()
            .map(|(i, frag)| Chunk {
                char_count: frag.text.chars().count(),
                text: frag.text,
                source_category: category,
                source_filename: document.filename.clone(),
                sequence_index: i,
                topic_label: frag.topic_label,
            })
            .collect()
    }
}
