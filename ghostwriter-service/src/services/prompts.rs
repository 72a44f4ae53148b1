//! Prompt templates for the pipeline stages.

/// Seed for the draft model, which was fine-tuned on `"{tone} {topic}"`.
pub fn draft_prompt(topic: &str, tone: &str) -> String {
    format!("{tone} {topic}")
}

/// Editor instructions wrapping the expanded draft.
///
/// The editor either polishes a relevant draft or writes a fresh post on the
/// same topic and tone when the draft wandered off.
pub fn editor_prompt(topic: &str, tone: &str, content: &str) -> String {
    format!(
        r#"
You are an expert blog editor and writer.

Topic: "{topic}"
Tone: {tone}

Step 1: Read the article below.
Step 2: If it's relevant to the topic and coherent:
         - Polish grammar, vocabulary, structure, headings, and readability.
         - Output only the improved blog.
       If it's irrelevant:
         - If it is irrelevant or poor, generate a new high-quality blog using the same topic and tone.

--- BLOG CONTENT START ---
{content}
--- BLOG CONTENT END ---

Write the final post in clear, well-structured paragraphs with headings where appropriate.
"#
    )
}
