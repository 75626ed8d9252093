//! Context assembly from retrieved listings

use crate::rag::Candidate;

const RECORD_SEPARATOR: &str = "\n\n---\n\n";

/// Joins retrieved listings into the prompt context, within a character budget
pub struct ContextAssembler {
    max_context_chars: usize,
}

impl ContextAssembler {
    #[must_use]
    pub const fn new(max_context_chars: usize) -> Self {
        Self { max_context_chars }
    }

    /// Assemble context in retrieval order.
    ///
    /// Returns the context and how many listings it holds. Listings that do
    /// not fit are dropped from the tail; when not even the first fits, it
    /// is cut at the budget.
    #[must_use]
    pub fn assemble(&self, candidates: &[Candidate]) -> (String, usize) {
        let mut context = String::new();
        let mut total_chars = 0;
        let mut included = 0;

        for candidate in candidates {
            let entry = Self::format_candidate(candidate);
            let separator_chars = if included == 0 {
                0
            } else {
                RECORD_SEPARATOR.chars().count()
            };
            let entry_chars = entry.chars().count();

            if total_chars + separator_chars + entry_chars > self.max_context_chars {
                if included == 0 {
                    context = entry.chars().take(self.max_context_chars).collect();
                    included = 1;
                }
                break;
            }

            if included > 0 {
                context.push_str(RECORD_SEPARATOR);
            }
            context.push_str(&entry);
            total_chars += separator_chars + entry_chars;
            included += 1;
        }

        (context, included)
    }

    fn format_candidate(candidate: &Candidate) -> String {
        format!(
            "Property ID: {}\n{}",
            candidate.property_id, candidate.page_content
        )
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(12_000)
    }
}
