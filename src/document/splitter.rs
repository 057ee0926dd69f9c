use crate::config::ChunkingConfig;
use crate::document::category::{section_markers, BULLET_GLYPHS};
use once_cell::sync::Lazy;
use regex::Regex;
use text_splitter::{ChunkConfig, TextSplitter};
use unicode_segmentation::UnicodeSegmentation;

/// One piece of split output before it gets provenance attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub topic_label: Option<String>,
}

/// Splits document text into labeled fragments. One implementation per
/// category; the dispatcher owns the category -> strategy mapping.
pub trait SplitStrategy: Send + Sync {
    fn split(&self, text: &str) -> Vec<Fragment>;
}

// "a)" / "b)" sub-problem marker at line start
static SUB_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*([a-z])\)[ \t]").unwrap());

fn fragment(text: &str, topic_label: Option<String>) -> Option<Fragment> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(Fragment {
        text: trimmed.to_string(),
        topic_label,
    })
}

/// Drop fragments below the minimum meaningful length. A document whose
/// every fragment got filtered but which still has real content degrades
/// to a single whole-document fragment instead of disappearing.
fn keep_meaningful(mut fragments: Vec<Fragment>, text: &str, min_len: usize) -> Vec<Fragment> {
    fragments.retain(|f| f.text.chars().count() >= min_len);

    if fragments.is_empty() && text.trim().chars().count() >= min_len {
        if let Some(whole) = fragment(text, None) {
            fragments.push(whole);
        }
    }

    fragments
}

/// Cut text at monotonically numbered line-start markers ("1.", "2.").
/// Text before the first marker becomes an unlabeled preamble fragment.
fn split_numbered(text: &str) -> Vec<Fragment> {
    let markers = section_markers(text);

    if markers.is_empty() {
        return fragment(text, None).into_iter().collect();
    }

    let mut fragments = Vec::new();

    if let Some(preamble) = fragment(&text[..markers[0].0], None) {
        fragments.push(preamble);
    }

    for (i, (start, number)) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map(|(s, _)| *s).unwrap_or(text.len());
        if let Some(section) = fragment(&text[*start..end], Some(number.to_string())) {
            fragments.push(section);
        }
    }

    fragments
}

/// Topic-numbered split for exam question sheets: every numbered
/// section ("1. Tema ...") becomes one fragment.
pub struct TopicSplitter {
    min_len: usize,
}

impl TopicSplitter {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            min_len: config.min_chunk_chars,
        }
    }
}

impl SplitStrategy for TopicSplitter {
    fn split(&self, text: &str) -> Vec<Fragment> {
        keep_meaningful(split_numbered(text), text, self.min_len)
    }
}

/// Problem-numbered split for exercise sheets. Problems are shorter
/// than exam topics, so the minimum length is lower; multi-part
/// problems past the sub-split threshold break again on "a)" markers.
pub struct ProblemSplitter {
    min_len: usize,
    subsplit_threshold: usize,
}

impl ProblemSplitter {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            min_len: config.min_problem_chars,
            subsplit_threshold: config.subsplit_threshold,
        }
    }

    /// Split one over-long problem at its letter markers, ascending
    /// letters only ("a)" then "b)"). Label parts "3a", "3b", ...
    fn subsplit(&self, frag: Fragment) -> Vec<Fragment> {
        let mut cuts: Vec<(usize, char)> = Vec::new();
        let mut last = ' ';

        for m in SUB_MARKER.captures_iter(&frag.text) {
            let letter = m[1].chars().next().expect("capture");
            if letter > last {
                cuts.push((m.get(0).expect("match").start(), letter));
                last = letter;
            }
        }

        if cuts.is_empty() {
            return vec![frag];
        }

        let label = frag.topic_label.as_deref().unwrap_or("");
        let mut parts = Vec::new();

        if let Some(head) = fragment(&frag.text[..cuts[0].0], frag.topic_label.clone()) {
            parts.push(head);
        }

        for (i, (start, letter)) in cuts.iter().enumerate() {
            let end = cuts.get(i + 1).map(|(s, _)| *s).unwrap_or(frag.text.len());
            let part_label = format!("{}{}", label, letter);
            if let Some(part) = fragment(&frag.text[*start..end], Some(part_label)) {
                parts.push(part);
            }
        }

        parts
    }
}

impl SplitStrategy for ProblemSplitter {
    fn split(&self, text: &str) -> Vec<Fragment> {
        let mut fragments = Vec::new();

        for frag in split_numbered(text) {
            if frag.text.chars().count() > self.subsplit_threshold {
                fragments.extend(self.subsplit(frag));
            } else {
                fragments.push(frag);
            }
        }

        keep_meaningful(fragments, text, self.min_len)
    }
}

/// Concept/bullet split for lecture slides: a heading always starts a
/// new fragment, consecutive bullets group two per concept.
pub struct BulletSplitter {
    min_len: usize,
}

const BULLETS_PER_CONCEPT: usize = 2;

impl BulletSplitter {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            min_len: config.min_chunk_chars,
        }
    }

    /// Heading: short, title-cased, no terminal punctuation
    fn is_heading(line: &str) -> bool {
        let Some(first) = line.chars().next() else {
            return false;
        };
        let Some(last) = line.chars().last() else {
            return false;
        };

        first.is_uppercase()
            && !".!?:;,".contains(last)
            && line.unicode_words().count() <= 8
            && line.chars().count() <= 60
    }

    fn is_bullet(line: &str) -> bool {
        line.starts_with(BULLET_GLYPHS)
    }
}

impl SplitStrategy for BulletSplitter {
    fn split(&self, text: &str) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut current = String::new();
        let mut bullet_count = 0;

        let mut flush = |buf: &mut String, frags: &mut Vec<Fragment>| {
            if let Some(frag) = fragment(buf, None) {
                frags.push(frag);
            }
            buf.clear();
        };

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if Self::is_bullet(trimmed) {
                if bullet_count >= BULLETS_PER_CONCEPT {
                    flush(&mut current, &mut fragments);
                    bullet_count = 0;
                }
                bullet_count += 1;
            } else if Self::is_heading(trimmed) {
                flush(&mut current, &mut fragments);
                bullet_count = 0;
            }

            current.push_str(trimmed);
            current.push('\n');
        }

        flush(&mut current, &mut fragments);

        keep_meaningful(fragments, text, self.min_len)
    }
}

/// Length-budgeted split for practicum/book text, preferring paragraph
/// and sentence boundaries. Zero overlap so chunks concatenate back to
/// the source.
pub struct SemanticSplitter {
    budget: usize,
    min_len: usize,
}

impl SemanticSplitter {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            budget: config.semantic_budget,
            min_len: config.min_chunk_chars,
        }
    }
}

impl SplitStrategy for SemanticSplitter {
    fn split(&self, text: &str) -> Vec<Fragment> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let splitter = TextSplitter::new(ChunkConfig::new(self.budget));

        let fragments = splitter
            .chunks(text)
            .filter_map(|chunk| fragment(chunk, None))
            .collect();

        keep_meaningful(fragments, text, self.min_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChunkingConfig {
        ChunkingConfig::default()
    }

    fn filler(sentence: &str, target_chars: usize) -> String {
        let mut out = String::new();
        while out.chars().count() < target_chars {
            out.push_str(sentence);
            out.push(' ');
        }
        out
    }

    #[test]
    fn test_topic_split_by_numbered_sections() {
        let text = format!(
            "1. Linear Algebra Overview\n{}\n2. Bayesian Estimation\n{}",
            filler("Vectors and matrices form the base of the course.", 120),
            filler("Priors and posteriors are combined through Bayes rule.", 120),
        );

        let chunks = TopicSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.starts_with("1. Linear Algebra Overview"));
        assert!(chunks[1].text.starts_with("2. Bayesian Estimation"));
        assert_eq!(chunks[0].topic_label.as_deref(), Some("1"));
        assert_eq!(chunks[1].topic_label.as_deref(), Some("2"));
    }

    #[test]
    fn test_topic_split_keeps_preamble() {
        let text = format!(
            "{}\n1. Prva tema\n{}",
            filler("Uputstvo za polaganje ispita i pravila ocenjivanja.", 80),
            filler("Sadrzaj prve teme ide ovde.", 80),
        );

        let chunks = TopicSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].topic_label.is_none());
        assert!(chunks[0].text.starts_with("Uputstvo"));
    }

    #[test]
    fn test_topic_split_ignores_inline_numerals() {
        let text = format!(
            "1. Neuronske mreze\nMreza ima 3. slojeva kako je objasnjeno. {}",
            filler("Svaki sloj ima tezine i aktivacionu funkciju.", 100),
        );

        let chunks = TopicSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_topic_split_degrades_to_whole_document() {
        // Exam-classified text without any numbering: one whole chunk
        let text = filler("Pitanja ce biti objavljena naknadno na sajtu kursa.", 200);

        let chunks = TopicSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].topic_label.is_none());
    }

    #[test]
    fn test_topic_split_empty_text() {
        assert!(TopicSplitter::new(&config()).split("").is_empty());
        assert!(TopicSplitter::new(&config()).split("  \n \t ").is_empty());
    }

    #[test]
    fn test_problem_split_one_chunk_per_problem() {
        let text = format!(
            "1. Problem A\n{}\n2. Problem B\n{}\n3. Problem C\n{}",
            filler("Izracunati ocekivanje date raspodele.", 60),
            filler("Naci varijansu iz uzorka.", 60),
            filler("Skicirati funkciju gustine.", 60),
        );

        let chunks = ProblemSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 3);
        let labels: Vec<_> = chunks.iter().filter_map(|c| c.topic_label.as_deref()).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_problem_split_subsplits_long_multipart() {
        // One long problem with a)/b) parts past the threshold
        let text = format!(
            "1. Slozeni zadatak\n{}\na) prvi deo\n{}\nb) drugi deo\n{}",
            filler("Posmatra se slucajna promenljiva sa datom gustinom.", 400),
            filler("Odrediti konstantu normalizacije.", 300),
            filler("Izracunati ocekivanje i varijansu.", 300),
        );

        let chunks = ProblemSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].topic_label.as_deref(), Some("1"));
        assert_eq!(chunks[1].topic_label.as_deref(), Some("1a"));
        assert_eq!(chunks[2].topic_label.as_deref(), Some("1b"));
    }

    #[test]
    fn test_problem_split_keeps_short_multipart_whole() {
        let text = "1. Zadatak\na) prvi deo zadatka ovde\nb) drugi deo zadatka ovde\n";

        let chunks = ProblemSplitter::new(&config()).split(text);

        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_bullet_split_breaks_on_heading_change() {
        let text = format!(
            "Neural Networks\n◼ {}\n◼ {}\nOverfitting\n◼ {}\n◼ {}\n",
            filler("perceptrons combine weighted inputs", 60),
            filler("activations introduce nonlinearity", 60),
            filler("too many parameters memorize noise", 60),
            filler("regularization shrinks the weights", 60),
        );

        let chunks = BulletSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.starts_with("Neural Networks"));
        assert!(chunks[1].text.starts_with("Overfitting"));
    }

    #[test]
    fn test_bullet_split_groups_bullets_in_pairs() {
        let bullets: Vec<String> = (0..4)
            .map(|i| format!("❑ {}", filler(&format!("bullet number {} content", i), 60)))
            .collect();
        let text = format!("Topic Heading\n{}\n", bullets.join("\n"));

        let chunks = BulletSplitter::new(&config()).split(&text);

        // heading + first two bullets, then two more bullets
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.starts_with("Topic Heading"));
        assert!(chunks[1].text.starts_with('❑'));
    }

    #[test]
    fn test_semantic_split_respects_budget() {
        let text = filler("This sentence pads the practicum style body text out.", 4000);

        let chunks = SemanticSplitter::new(&config()).split(&text);

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 1500);
        }
    }

    #[test]
    fn test_semantic_split_never_breaks_words() {
        let text = filler("boundary check words stay intact here always.", 3200);

        let chunks = SemanticSplitter::new(&config()).split(&text);

        for chunk in &chunks {
            assert!(chunk.text.ends_with('.') || chunk.text.ends_with("always"));
        }
    }

    #[test]
    fn test_minimum_length_filter() {
        // A stray page number between sections must not become a chunk
        let text = format!(
            "1. Prva tema\n{}\n2. 42\n3. Druga tema\n{}",
            filler("Sadrzaj prve teme sa dovoljno teksta.", 100),
            filler("Sadrzaj druge teme sa dovoljno teksta.", 100),
        );

        let chunks = TopicSplitter::new(&config()).split(&text);

        for chunk in &chunks {
            assert!(chunk.text.chars().count() >= config().min_chunk_chars);
        }
        assert!(chunks.iter().all(|c| c.topic_label.as_deref() != Some("2")));
    }

    #[test]
    fn test_coverage_no_content_dropped() {
        let body_a = filler("Prva tema pokriva linearnu regresiju.", 120);
        let body_b = filler("Druga tema pokriva klasifikaciju.", 120);
        let text = format!("1. Prva tema\n{}\n2. Druga tema\n{}", body_a, body_b);

        let chunks = TopicSplitter::new(&config()).split(&text);
        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n");

        let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(normalize(&rejoined), normalize(&text));
    }
}
