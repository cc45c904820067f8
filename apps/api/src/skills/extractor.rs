//! Skill Extractor — catalog matching plus optional entity-tagger enrichment.

use std::collections::{BTreeSet, HashSet};

use crate::skills::catalog::SkillCatalog;
use crate::skills::tagger::EntityTagger;

/// Extracts the set of catalog skills mentioned in `text`.
///
/// The whole-word catalog pass gives deterministic baseline recall; the
/// tagger pass is a best-effort booster and is skipped entirely when no
/// tagger is available. Returns title-cased skills, lexicographically
/// sorted, with no case-insensitive duplicates.
pub fn extract_skills(text: &str, tagger: Option<&dyn EntityTagger>) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let catalog = SkillCatalog::global();
    let lowered = text.to_lowercase();

    let mut found: BTreeSet<String> = BTreeSet::new();

    for (term, matcher) in catalog.matchers() {
        if matcher.is_match(&lowered) {
            found.insert(title_case(term));
        }
    }

    if let Some(tagger) = tagger {
        for entity in tagger.entities(text) {
            if !entity.label.is_skill_like() {
                continue;
            }
            let entity_lower = entity.text.to_lowercase();
            if catalog.terms().iter().any(|term| entity_lower.contains(term)) {
                found.insert(title_case(&entity.text));
            }
        }
    }

    found.into_iter().collect()
}

/// Skills the job description asks for that the resume lacks, in the
/// extractor's sorted order. Empty job description yields an empty list.
pub fn missing_skills(
    resume_skills: &[String],
    job_description: &str,
    tagger: Option<&dyn EntityTagger>,
) -> Vec<String> {
    if job_description.trim().is_empty() {
        return Vec::new();
    }

    let have: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    extract_skills(job_description, tagger)
        .into_iter()
        .filter(|skill| !have.contains(&skill.to_lowercase()))
        .collect()
}

/// Title-cases a string: the first alphabetic character of every run of
/// letters is uppercased, the rest lowercased. Non-letters pass through and
/// start a new run, so "ci/cd" becomes "Ci/Cd" and "c++" becomes "C++".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
