//! Dictionary checks that never fail a run.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use bdsa_model::ShimDictionary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LintFinding {
    /// A synonym equal to its own canonical value.
    SelfSynonym { field: String, canonical: String },
    /// A synonym declared under more than one canonical value; `winner` is
    /// the one resolution will use.
    AmbiguousSynonym {
        field: String,
        synonym: String,
        canonicals: Vec<String>,
        winner: String,
    },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfSynonym { field, canonical } => {
                write!(f, "{field}: '{canonical}' lists itself as a synonym")
            }
            Self::AmbiguousSynonym {
                field,
                synonym,
                canonicals,
                winner,
            } => write!(
                f,
                "{field}: '{synonym}' is listed under {}; '{winner}' wins",
                canonicals
                    .iter()
                    .map(|c| format!("'{c}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Findings in dictionary declaration order.
pub fn lint_dictionary(dictionary: &ShimDictionary) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    for (field, synonyms) in dictionary.fields() {
        let mut owners: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (canonical, raw_values) in synonyms.terms() {
            for raw in raw_values {
                if raw == canonical {
                    findings.push(LintFinding::SelfSynonym {
                        field: field.to_string(),
                        canonical: canonical.to_string(),
                    });
                    continue;
                }
                let entry = owners.entry(raw.as_str()).or_default();
                if !entry.contains(&canonical) {
                    entry.push(canonical);
                }
            }
        }
        for (synonym, canonicals) in owners {
            if canonicals.len() > 1 {
                findings.push(LintFinding::AmbiguousSynonym {
                    field: field.to_string(),
                    synonym: synonym.to_string(),
                    winner: canonicals[0].to_string(),
                    canonicals: canonicals.iter().map(|c| c.to_string()).collect(),
                });
            }
        }
    }
    findings
}
