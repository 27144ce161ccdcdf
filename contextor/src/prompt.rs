//! Persona prompt: a fixed template filled with retrieved context and the question.

use rag_store::RagHit;

/// Fixed persona template. `{context}` and `{question}` are the only slots.
///
/// Whether a question is disrespectful is left entirely to the model.
pub const PERSONA_TEMPLATE: &str = r#"
You are a really friendly person called Piyush Jain who converses in a human-like manner maintaining tonality and pauses such that your
conversation style resembles that of a human. Use the following retrieved context to answer the question. 
Keep the answers really short, precise, and to the point. Try to maintain an interesting conversation without expounding. Do not give lists or bullet points, answer in a human-like manner.
If the questions are disrespectful, make sure to humiliate the user in a clever short way.  
Do not introduce yourself unless specifically asked.

### Retrieved Context:
{context}

### User Question:
{question}

### Piyush's Response: 
"#;

/// Fills [`PERSONA_TEMPLATE`] with `context` and `question`, verbatim.
///
/// Slots are substituted in a single left-to-right pass, so braces inside
/// the context never get re-expanded.
///
/// # Example
/// ```
/// use contextor::prompt::compose;
/// let p = compose("Piyush likes chess.", "What does Piyush like?");
/// assert!(p.contains("### Retrieved Context:\nPiyush likes chess."));
/// ```
pub fn compose(context: &str, question: &str) -> String {
    let mut out = String::with_capacity(PERSONA_TEMPLATE.len() + context.len() + question.len());
    let mut rest = PERSONA_TEMPLATE;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix("{context}") {
            out.push_str(context);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{question}") {
            out.push_str(question);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Joins hits in rank order, separated by a blank line.
pub fn join_context(hits: &[RagHit]) -> String {
    hits.iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str, score: f32) -> RagHit {
        RagHit {
            score,
            text: text.into(),
            chunk_index: 0,
        }
    }

    #[test]
    fn both_slots_are_filled() {
        let p = compose("Piyush likes chess.", "What does Piyush like?");
        assert!(p.contains("### Retrieved Context:\nPiyush likes chess.\n"));
        assert!(p.contains("### User Question:\nWhat does Piyush like?\n"));
        assert!(!p.contains("{context}"));
        assert!(!p.contains("{question}"));
    }

    #[test]
    fn template_keeps_persona_directives() {
        let p = compose("", "hi");
        assert!(p.contains("called Piyush Jain"));
        assert!(p.contains("short, precise"));
        assert!(p.contains("Do not give lists or bullet points"));
        assert!(p.contains("If the questions are disrespectful"));
        assert!(p.trim_end().ends_with("### Piyush's Response:"));
    }

    #[test]
    fn template_text_is_kept_byte_for_byte() {
        assert!(PERSONA_TEMPLATE.starts_with("\nYou are a really friendly person"));
        assert!(PERSONA_TEMPLATE.contains("to answer the question. \nKeep the answers"));
        assert!(PERSONA_TEMPLATE.contains("in a clever short way.  \nDo not introduce"));
        assert!(PERSONA_TEMPLATE.ends_with("### Piyush's Response: \n"));
    }

    #[test]
    fn placeholders_inside_values_are_not_expanded() {
        let p = compose("literal {question} here", "real question");
        assert!(p.contains("literal {question} here"));
        assert_eq!(p.matches("real question").count(), 1);
    }

    #[test]
    fn context_joins_hits_in_rank_order() {
        let joined = join_context(&[hit("first", 0.9), hit("second", 0.4)]);
        assert_eq!(joined, "first\n\nsecond");
        assert_eq!(join_context(&[]), "");
    }
}
