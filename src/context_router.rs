//! Decides whether a chat message gets the detection summary attached.

/// Matched anywhere in the lowercased message, so "painted" counts as "pain".
pub const DOMAIN_KEYWORDS: [&str; 10] = [
    "tooth", "teeth", "wisdom", "xray", "x-ray", "image", "detect", "see", "bad", "pain",
];

/// Words that point back at the analyzed image. Matched as whole words only:
/// "it" sits inside too many unrelated words ("capital", "with").
pub const DEICTIC_KEYWORDS: [&str; 6] = ["it", "they", "them", "that", "this", "those"];

/// The single prompt sent to every model backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedPrompt {
    pub text: String,
    pub context_attached: bool,
}

pub fn is_relevant(user_text: &str) -> bool {
    let lower = user_text.to_lowercase();
    if DOMAIN_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return true;
    }
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| DEICTIC_KEYWORDS.contains(&word))
}

/// Attach the context snippet when there is one and the message is about
/// the image; otherwise pass the message through unchanged.
///
/// Callers must not route empty or whitespace-only text.
pub fn route(user_text: &str, context_snippet: &str) -> RoutedPrompt {
    if !context_snippet.is_empty() && is_relevant(user_text) {
        RoutedPrompt {
            text: format!("[Context: {}] Question: {}", context_snippet, user_text),
            context_attached: true,
        }
    } else {
        RoutedPrompt {
            text: user_text.to_string(),
            context_attached: false,
        }
    }
}
