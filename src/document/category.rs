use crate::config::DetectionConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Document category, drives which chunking strategy is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ExamQuestions,
    Exercises,
    LectureSlides,
    Practicum,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExamQuestions => "exam_questions",
            Self::Exercises => "exercises",
            Self::LectureSlides => "lecture_slides",
            Self::Practicum => "practicum",
            Self::Unknown => "unknown",
        }
    }
}

/// Filename keyword table, in priority order (first match wins).
/// Exam detection is the most specific, so it goes first.
const FILENAME_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::ExamQuestions,
        &["ispitna", "pitanja", "ispit", "questions"],
    ),
    (
        Category::Exercises,
        &["vezbe", "ponavljanje", "zadaci", "exercises", "homework"],
    ),
    (
        Category::LectureSlides,
        &["predavanje", "slajd", "prezentacija", "lecture", "slides"],
    ),
    (
        Category::Practicum,
        &["praktikum", "knjiga", "skripta", "teorija", "textbook"],
    ),
];

/// Bullet glyphs used by the slide decks we ingest
pub const BULLET_GLYPHS: &[char] = &['◼', '❑', '•'];

const FORMULA_SYMBOLS: &[char] = &[
    '∑', '∫', '√', '≈', '≤', '≥', '±', '×', '÷', 'λ', 'σ', 'μ', 'θ', 'π',
];

// Line-start "1. " style section marker. Capped at 3 digits so years
// ("2024.") don't register as headings.
static SECTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(\d{1,3})\.[ \t]").unwrap());

// Section marker followed by an uppercase letter (Latin or Serbian),
// the shape of an exam topic heading
static EXAM_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d{1,3}\.[ \t]+\p{Lu}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    ByFilename,
    ByContent,
    Default,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByFilename => "by filename",
            Self::ByContent => "by content",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub category: Category,
    pub method: DetectionMethod,
}

/// Maps (filename, text) to a Category. Never fails: anything
/// unrecognized falls through to `Unknown`, which the dispatcher
/// chunks semantically.
pub struct CategoryClassifier {
    detection: DetectionConfig,
}

impl CategoryClassifier {
    pub fn new(detection: DetectionConfig) -> Self {
        Self { detection }
    }

    pub fn classify(&self, filename: &str, text: &str) -> Category {
        self.detect(filename, text).category
    }

    /// Classify and report how the category was found
    pub fn detect(&self, filename: &str, text: &str) -> Detection {
        let filename_lower = filename.to_lowercase();

        // Step 1: filename keywords
        for (category, keywords) in FILENAME_KEYWORDS {
            if keywords.iter().any(|kw| filename_lower.contains(kw)) {
                debug!(
                    "🔍 Detected {} in {} (by filename)",
                    category.as_str(),
                    filename
                );
                return Detection {
                    category: *category,
                    method: DetectionMethod::ByFilename,
                };
            }
        }

        // Step 2: content fallback
        let by_content = if self.looks_like_exam_questions(text) {
            Some(Category::ExamQuestions)
        } else if self.looks_like_lecture_slides(text) {
            Some(Category::LectureSlides)
        } else if self.looks_like_theory(text) {
            Some(Category::Practicum)
        } else if self.looks_like_exercises(text) {
            Some(Category::Exercises)
        } else {
            None
        };

        match by_content {
            Some(category) => {
                debug!(
                    "🔍 Detected {} in {} (by content)",
                    category.as_str(),
                    filename
                );
                Detection {
                    category,
                    method: DetectionMethod::ByContent,
                }
            }
            None => {
                debug!("🔍 No category match for {}, using default", filename);
                Detection {
                    category: Category::Unknown,
                    method: DetectionMethod::Default,
                }
            }
        }
    }

    /// Numbered sections with uppercase headings, dense enough to be an
    /// exam question list
    fn looks_like_exam_questions(&self, text: &str) -> bool {
        EXAM_HEADING.find_iter(text).count() >= self.detection.min_section_markers
    }

    /// Slide decks carry ◼/❑ markers, or lots of plain bullet dots
    fn looks_like_lecture_slides(&self, text: &str) -> bool {
        if text.contains('◼') || text.contains('❑') {
            return true;
        }

        text.matches('•').count() >= self.detection.min_bullet_count
    }

    /// Formula-symbol density marks theory material (practicum, scripts)
    fn looks_like_theory(&self, text: &str) -> bool {
        let symbols = text.chars().filter(|c| FORMULA_SYMBOLS.contains(c)).count();
        if symbols == 0 {
            return false;
        }

        text.chars().count() <= symbols * self.detection.formula_chars_per_symbol
    }

    /// Many short numbered items relative to total length
    fn looks_like_exercises(&self, text: &str) -> bool {
        let markers = SECTION_MARKER.find_iter(text).count();
        if markers < self.detection.min_numbered_lines {
            return false;
        }

        let avg_item_chars = text.chars().count() / markers;
        avg_item_chars <= self.detection.max_problem_line_chars
    }
}

/// Byte offsets and parsed numbers of line-start section markers.
/// Numbers must be monotonically non-decreasing: a stray "2." after
/// section 5 is prose, not a new section.
pub(crate) fn section_markers(text: &str) -> Vec<(usize, u32)> {
    let mut markers = Vec::new();
    let mut last: u32 = 0;

    for m in SECTION_MARKER.captures_iter(text) {
        let whole = m.get(0).expect("match");
        let number: u32 = match m[1].parse() {
            Ok(n) => n,
            Err(_) => continue,
        };

        if number >= last {
            markers.push((whole.start(), number));
            last = number;
        }
    }

    markers
}
