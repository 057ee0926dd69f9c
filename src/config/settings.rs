use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChunkingConfig {
    /// Max chars per chunk for the semantic strategy
    #[serde(default = "default_semantic_budget")]
    pub semantic_budget: usize,
    /// Fragments shorter than this are dropped as noise (page numbers etc.)
    #[serde(default = "default_min_chunk_chars")]
    pub min_chunk_chars: usize,
    /// Exercises keep shorter fragments than other categories
    #[serde(default = "default_min_problem_chars")]
    pub min_problem_chars: usize,
    /// Multi-part problems split on "a)" markers only past this length
    #[serde(default = "default_subsplit_threshold")]
    pub subsplit_threshold: usize,
}

fn default_semantic_budget() -> usize {
    1500
}

fn default_min_chunk_chars() -> usize {
    50
}

fn default_min_problem_chars() -> usize {
    30
}

fn default_subsplit_threshold() -> usize {
    800
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            semantic_budget: default_semantic_budget(),
            min_chunk_chars: default_min_chunk_chars(),
            min_problem_chars: default_min_problem_chars(),
            subsplit_threshold: default_subsplit_threshold(),
        }
    }
}

/// Thresholds for content-based category detection.
///
/// These back the fallback heuristics when the filename carries no
/// recognized keyword. Tune via `APP_DETECTION__*` env vars.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DetectionConfig {
    /// Numbered section markers needed to call a document exam questions
    #[serde(default = "default_min_section_markers")]
    pub min_section_markers: usize,
    /// Numbered lines needed to call a document an exercise sheet
    #[serde(default = "default_min_numbered_lines")]
    pub min_numbered_lines: usize,
    /// Numbered lines must average below this many chars to look like exercises
    #[serde(default = "default_max_problem_line_chars")]
    pub max_problem_line_chars: usize,
    /// Bullet glyphs needed to call a document lecture slides
    #[serde(default = "default_min_bullet_count")]
    pub min_bullet_count: usize,
    /// One formula symbol per this many chars marks theory material
    #[serde(default = "default_formula_chars_per_symbol")]
    pub formula_chars_per_symbol: usize,
}

fn default_min_section_markers() -> usize {
    3
}

fn default_min_numbered_lines() -> usize {
    4
}

fn default_max_problem_line_chars() -> usize {
    200
}

fn default_min_bullet_count() -> usize {
    10
}

fn default_formula_chars_per_symbol() -> usize {
    200
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_section_markers: default_min_section_markers(),
            min_numbered_lines: default_min_numbered_lines(),
            max_problem_line_chars: default_max_problem_line_chars(),
            min_bullet_count: default_min_bullet_count(),
            formula_chars_per_symbol: default_formula_chars_per_symbol(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkerConfig {
    #[serde(default = "default_materials_root")]
    pub materials_root: PathBuf,
    /// Where the JSONL sink writes finished chunks
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

fn default_materials_root() -> PathBuf {
    PathBuf::from("materials")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("chunks.jsonl")
}

fn default_concurrency() -> usize {
    4
}

fn default_max_file_size_mb() -> u64 {
    100
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            materials_root: default_materials_root(),
            output_path: default_output_path(),
            concurrency: default_concurrency(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load from environment first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Load from config file
            .add_source(File::with_name("config/settings").required(false))
            // Override with environment variables (prefix: APP)
            // Example: APP_CHUNKING__SEMANTIC_BUDGET=1000
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;

        // Validate settings
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.chunking.semantic_budget <= self.chunking.min_chunk_chars {
            anyhow::bail!(
                "semantic_budget ({}) must exceed min_chunk_chars ({})",
                self.chunking.semantic_budget,
                self.chunking.min_chunk_chars
            );
        }

        if self.worker.concurrency == 0 {
            anyhow::bail!("worker concurrency must be at least 1");
        }

        if !self.worker.materials_root.exists() {
            anyhow::bail!(
                "Materials root path not found: {:?}",
                self.worker.materials_root
            );
        }

        Ok(())
    }
}
