#![allow(dead_code)]

//! Entity-tagger capability seam.
//!
//! Tagging is a best-effort precision/recall booster for skill extraction.
//! The capability may be absent (the extractor takes an `Option`), and when
//! present it must never fail the extraction. `HeuristicTagger` is the
//! in-tree implementation; anything smarter plugs in behind the same trait.

/// Semantic category of a tagged span. Only organization/product/technology
/// style entities are interesting to the skill extractor; the rest exist so
/// richer taggers have somewhere to put what they find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Product,
    Technology,
    Person,
    Location,
    Other,
}

impl EntityLabel {
    /// Whether spans with this label are worth testing against the catalog.
    pub fn is_skill_like(self) -> bool {
        matches!(
            self,
            EntityLabel::Organization | EntityLabel::Product | EntityLabel::Technology
        )
    }
}

#[derive(Debug, Clone)]
pub struct TaggedEntity {
    /// Original-case text of the span.
    pub text: String,
    pub label: EntityLabel,
}

pub trait EntityTagger: Send + Sync {
    /// Tags candidate entity spans in original-case text. Infallible by
    /// contract: a tagger with nothing to say returns an empty vec.
    fn entities(&self, text: &str) -> Vec<TaggedEntity>;
}

/// Rule-based tagger over capitalization shape:
/// - all-caps tokens ("AWS", "EC2") → Product
/// - mixed-case tokens ("PyTorch", "JavaScript") → Technology
/// - runs of two or more capitalized words ("Google Cloud") → Organization
///
/// Ordinary sentence-initial words are single capitalized tokens and are
/// deliberately not emitted on their own.
pub struct HeuristicTagger;

impl EntityTagger for HeuristicTagger {
    fn entities(&self, text: &str) -> Vec<TaggedEntity> {
        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '#' || c == '+'));
            if word.is_empty() {
                flush_run(&mut run, &mut entities);
                continue;
            }

            if is_acronym(word) {
                entities.push(TaggedEntity {
                    text: word.to_string(),
                    label: EntityLabel::Product,
                });
            } else if is_mixed_case(word) {
                entities.push(TaggedEntity {
                    text: word.to_string(),
                    label: EntityLabel::Technology,
                });
            }

            if starts_uppercase(word) {
                run.push(word);
            } else {
                flush_run(&mut run, &mut entities);
            }

            // Trailing punctuation ends a span: "Python, AWS" is two tokens,
            // not one organization.
            if raw.ends_with(|c: char| !(c.is_alphanumeric() || c == '#' || c == '+')) {
                flush_run(&mut run, &mut entities);
            }
        }
        flush_run(&mut run, &mut entities);

        entities
    }
}

fn flush_run(run: &mut Vec<&str>, entities: &mut Vec<TaggedEntity>) {
    if run.len() >= 2 {
        entities.push(TaggedEntity {
            text: run.join(" "),
            label: EntityLabel::Organization,
        });
    }
    run.clear();
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().any(|c| c.is_uppercase())
        && !word.chars().any(|c| c.is_lowercase())
}

fn is_mixed_case(word: &str) -> bool {
    word.chars().any(|c| c.is_lowercase()) && word.chars().skip(1).any(|c| c.is_uppercase())
}
