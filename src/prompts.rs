//! Instruction Templates
//!
//! Maps a transformation action name to the prompt sent to the model.
//! Template selection is a pure function of (action, source text); unknown
//! actions fall back to a generic instruction.

/// Actions with a dedicated instruction template
pub const ACTIONS: &[&str] = &[
    "rewrite_casual",
    "rewrite_professional",
    "summarise",
    "expand",
    "paraphrase",
    "correct_grammar",
];

/// Build the prompt for a fixed action over the selected text.
///
/// The selected text always appears verbatim at the end of the prompt.
pub fn render(action: &str, text: &str) -> String {
    let instruction = match action {
        "rewrite_casual" => "Rewrite the following text in a casual tone.",
        "rewrite_professional" => "Rewrite the following text in a professional tone.",
        "summarise" => "Summarise the following text.",
        "expand" => "Expand on the following text.",
        "paraphrase" => "Paraphrase the following text.",
        "correct_grammar" => "Correct the grammar in the following text.",
        // The selection itself is the prompt when a dynamic request arrives
        // without literal prompt text.
        "dynamic_prompt" => return text.to_string(),
        _ => return format!("Process the following text: {text}"),
    };
    format!("{instruction} Respond only with the updated text: {text}")
}
