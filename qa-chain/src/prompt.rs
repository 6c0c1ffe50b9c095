//! "Stuff" prompt: every retrieved passage goes into a single system message.

use rag_store::RetrievedDocument;

/// System instructions placed before the context block.
pub const SYSTEM_TEMPLATE_HEAD: &str = "Use the following pieces of context to answer the user's question. \n\
If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\
----------------\n";

/// Joins document texts with a blank line, in retrieval order.
///
/// No budget is applied; all context goes into one prompt.
pub fn stuff_context(docs: &[RetrievedDocument]) -> String {
    docs.iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the system message for `docs`. The question goes in the user message.
///
/// # Example
/// ```
/// # use qa_chain::prompt::build_system_prompt;
/// let prompt = build_system_prompt(&[]);
/// assert!(prompt.ends_with("----------------\n"));
/// ```
pub fn build_system_prompt(docs: &[RetrievedDocument]) -> String {
    let mut out = String::from(SYSTEM_TEMPLATE_HEAD);
    out.push_str(&stuff_context(docs));
    out
}
