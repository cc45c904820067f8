//! Skill Catalog — the static reference set of known skill terms.
//!
//! Categories are flattened once at first use into a single lookup set with
//! one precompiled whole-word matcher per term. Built once, never mutated,
//! safely shared across requests.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Categorized skill terms. All lowercase by construction; matching happens
/// against lowercased input.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "python", "java", "javascript", "c++", "c#", "ruby", "php", "swift", "kotlin", "go",
            "rust", "typescript", "html", "css", "sql", "r", "matlab", "scala", "perl", "bash",
            "shell",
        ],
    ),
    (
        "web_frameworks",
        &[
            "django", "flask", "fastapi", "spring", "express", "react", "angular", "vue",
            "laravel", "ruby on rails", "asp.net", "jquery", "bootstrap", "tailwind", "sass",
            "less",
        ],
    ),
    (
        "data_science",
        &[
            "machine learning", "deep learning", "natural language processing", "nlp",
            "computer vision", "data analysis", "data visualization", "statistical modeling",
            "predictive modeling", "neural networks", "tensorflow", "pytorch", "keras",
            "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn", "plotly", "tableau",
            "power bi",
        ],
    ),
    (
        "databases",
        &[
            "mysql", "postgresql", "mongodb", "redis", "sqlite", "oracle", "sql server",
            "cassandra", "elasticsearch", "dynamodb", "firebase",
        ],
    ),
    (
        "cloud_technologies",
        &[
            "aws", "azure", "google cloud", "docker", "kubernetes", "terraform", "jenkins",
            "ci/cd", "serverless", "lambda", "s3", "ec2", "rds",
        ],
    ),
    (
        "tools_methodologies",
        &[
            "git", "github", "gitlab", "jira", "agile", "scrum", "devops", "rest api", "graphql",
            "microservices", "oauth", "jwt", "linux", "unix",
        ],
    ),
];

/// Flattened catalog with precompiled whole-word matchers, one per term.
pub struct SkillCatalog {
    terms: Vec<&'static str>,
    matchers: Vec<Regex>,
}

static CATALOG: Lazy<SkillCatalog> = Lazy::new(SkillCatalog::build);

impl SkillCatalog {
    fn build() -> Self {
        let mut terms = Vec::new();
        let mut seen = HashSet::new();
        for (_, list) in CATEGORIES {
            for term in *list {
                if seen.insert(*term) {
                    terms.push(*term);
                }
            }
        }

        let matchers = terms
            .iter()
            .map(|term| {
                Regex::new(&format!(r"\b{}\b", regex::escape(term)))
                    .expect("catalog term compiles to a word-boundary pattern")
            })
            .collect();

        Self { terms, matchers }
    }

    /// The process-wide catalog instance.
    pub fn global() -> &'static SkillCatalog {
        &CATALOG
    }

    /// Flattened lowercase terms, in catalog order.
    pub fn terms(&self) -> &[&'static str] {
        &self.terms
    }

    /// `(term, whole-word matcher)` pairs.
    pub fn matchers(&self) -> impl Iterator<Item = (&'static str, &Regex)> {
        self.terms.iter().copied().zip(self.matchers.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_terms_cover_every_category() {
        let catalog = SkillCatalog::global();
        let expected: usize = CATEGORIES.iter().map(|(_, list)| list.len()).sum();
        assert_eq!(catalog.terms().len(), expected);
    }

    #[test]
    fn test_terms_are_lowercase_and_unique() {
        let catalog = SkillCatalog::global();
        let mut seen = HashSet::new();
        for term in catalog.terms() {
            assert_eq!(*term, term.to_lowercase(), "term {term} is not lowercase");
            assert!(seen.insert(*term), "duplicate term {term}");
        }
    }

    #[test]
    fn test_matchers_require_word_boundaries() {
        let catalog = SkillCatalog::global();
        let (_, java) = catalog
            .matchers()
            .find(|(term, _)| *term == "java")
            .unwrap();
        assert!(java.is_match("we use java in production"));
        assert!(!java.is_match("javascripting all day"));
    }

    #[test]
    fn test_multi_word_terms_match_as_phrases() {
        let catalog = SkillCatalog::global();
        let (_, ml) = catalog
            .matchers()
            .find(|(term, _)| *term == "machine learning")
            .unwrap();
        assert!(ml.is_match("applied machine learning models"));
        assert!(!ml.is_match("machine and learning separately"));
    }

    #[test]
    fn test_punctuated_terms_are_present() {
        let terms = SkillCatalog::global().terms();
        for expected in ["c++", "c#", "ci/cd", "asp.net", "scikit-learn"] {
            assert!(terms.contains(&expected), "missing {expected}");
        }
    }
}
