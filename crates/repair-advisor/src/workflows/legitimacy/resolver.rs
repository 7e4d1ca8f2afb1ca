use serde::Serialize;

use super::knowledge::IntervalKnowledgeBase;

/// Pipeline stage that produced a match, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    ExactKey,
    Substring,
    Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub key: &'static str,
    pub stage: MatchStage,
}

const MIN_TOKEN_LEN: usize = 4;

/// Maps free-text service labels onto knowledge-base keys.
#[derive(Debug, Clone, Copy)]
pub struct ServiceResolver<'kb> {
    kb: &'kb IntervalKnowledgeBase,
}

impl<'kb> ServiceResolver<'kb> {
    pub fn new(kb: &'kb IntervalKnowledgeBase) -> Self {
        Self { kb }
    }

    pub fn resolve(&self, label: &str) -> Option<Resolution> {
        let normalized = normalize_label(label);
        if normalized.is_empty() {
            return None;
        }

        self.exact(&normalized)
            .or_else(|| self.substring(&normalized))
            .or_else(|| self.token(&normalized))
    }

    fn exact(&self, normalized: &str) -> Option<Resolution> {
        self.kb.lookup(normalized).map(|entry| Resolution {
            key: entry.key,
            stage: MatchStage::ExactKey,
        })
    }

    fn substring(&self, normalized: &str) -> Option<Resolution> {
        self.kb
            .entries()
            .iter()
            .find(|entry| {
                let name = normalize_label(entry.name);
                name.contains(normalized) || normalized.contains(name.as_str())
            })
            .map(|entry| Resolution {
                key: entry.key,
                stage: MatchStage::Substring,
            })
    }

    /// Every entry whose name contains a qualifying word is a candidate. The
    /// candidate with the most such words wins and ties go to the earlier
    /// entry, so "cabin filter" lands on the cabin filter rather than the
    /// first filter in the table.
    fn token(&self, normalized: &str) -> Option<Resolution> {
        let tokens: Vec<&str> = normalized
            .split('_')
            .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
            .collect();
        if tokens.is_empty() {
            return None;
        }

        let mut best: Option<(&'static str, usize)> = None;
        for entry in self.kb.entries() {
            let name = normalize_label(entry.name);
            let hits = tokens.iter().filter(|token| name.contains(*token)).count();
            if hits == 0 {
                continue;
            }
            match best {
                Some((_, best_hits)) if best_hits >= hits => {}
                _ => best = Some((entry.key, hits)),
            }
        }

        best.map(|(key, _)| Resolution {
            key,
            stage: MatchStage::Token,
        })
    }
}

/// Lowercases, trims, and joins whitespace-separated words with underscores.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
