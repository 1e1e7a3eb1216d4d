//! Prompt templates sent to the backend.

use docforge_core::DocumentKind;

/// Prompt asking for a numbered outline of `count` titles.
pub fn outline_prompt(topic: &str, kind: DocumentKind, count: usize) -> String {
    match kind {
        DocumentKind::Deck => format!(
            "Generate a presentation outline for the topic: {topic}\n\
             \n\
             Create exactly {count} slide titles that:\n\
             - Form a logical, flowing narrative\n\
             - Are concise and clear (5-8 words each)\n\
             - Start with an Introduction, cover the main points, and end with a Conclusion\n\
             \n\
             Return only the slide titles as a numbered list, one per line, and nothing else.\n"
        ),
        DocumentKind::Flow => format!(
            "Generate a document outline for the topic: {topic}\n\
             \n\
             Create exactly {count} section titles that:\n\
             - Form a logical, comprehensive structure\n\
             - Are clear and descriptive\n\
             - Start with an Introduction, cover the main body, and end with a Conclusion\n\
             \n\
             Return only the section titles as a numbered list, one per line, and nothing else.\n"
        ),
    }
}

/// Prompt asking for the content of one section.
///
/// `context` is left out entirely when empty.
pub fn section_prompt(
    topic: &str,
    title: &str,
    kind: DocumentKind,
    context: &str,
    target_length: usize,
) -> String {
    let context = context.trim();
    match kind {
        DocumentKind::Deck => {
            let mut prompt = format!(
                "You are writing concise, impactful slide content.\n\
                 \n\
                 Presentation Topic: {topic}\n\
                 Slide Title: {title}\n"
            );
            if !context.is_empty() {
                prompt.push_str(&format!("Previous Slides Context: {context}\n"));
            }
            prompt.push_str(&format!(
                "\n\
                 Write the bullet points for this slide:\n\
                 - 3 to 5 points, one per line\n\
                 - Keep each point to one or two sentences, about {target_length} words in total\n\
                 - Follow on logically from the previous slides\n\
                 \n\
                 Do not use markdown, bullet symbols or numbering, and do not repeat the slide title.\n"
            ));
            prompt
        }
        DocumentKind::Flow => {
            let mut prompt = format!(
                "You are writing professional document content.\n\
                 \n\
                 Document Topic: {topic}\n\
                 Section Title: {title}\n"
            );
            if !context.is_empty() {
                prompt.push_str(&format!("Previous Sections Context: {context}\n"));
            }
            prompt.push_str(&format!(
                "\n\
                 Write the content of this section:\n\
                 - Approximately {target_length} words\n\
                 - Clear, formal language with relevant details and examples\n\
                 - A smooth transition from the previous sections\n\
                 - Paragraphs separated by a blank line\n\
                 \n\
                 Do not use markdown or headings, and do not repeat the section title.\n"
            ));
            prompt
        }
    }
}

/// Prompt asking for a rewrite of existing content.
pub fn refinement_prompt(content: &str, instruction: &str) -> String {
    format!(
        "You are refining existing content based on user feedback.\n\
         \n\
         Original Content:\n\
         {content}\n\
         \n\
         Refinement Request:\n\
         {instruction}\n\
         \n\
         Rewrite the content so that it:\n\
         - Addresses the refinement request\n\
         - Keeps the overall structure and approximately the same length\n\
         - Stays relevant to the section topic\n\
         \n\
         Return only the refined content, without markdown or explanations.\n"
    )
}
