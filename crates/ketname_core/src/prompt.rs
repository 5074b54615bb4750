//! Prompt builder for naming requests.

/// Number of names the model is asked for.
pub const SUGGESTION_COUNT: usize = 3;

const RESPONSE_SCHEMA: &str = r#"interface SuggestionSet {
  suggestions: {
    name: string;       // Suggested identifier
    reason: string;     // Why this name fits
    confidence: number; // Confidence score from 0.0 to 1.0
  }[];
}"#;

const RESPONSE_EXAMPLE: &str = r#"{
  "suggestions": [
    {
      "name": "calculateTotalPrice",
      "reason": "Calculates the total price of items in the shopping cart.",
      "confidence": 0.95
    },
    {
      "name": "getTotalPrice",
      "reason": "Retrieves the total price from a stored value.",
      "confidence": 0.8
    },
    {
      "name": "totalPrice",
      "reason": "Short noun form if the value is stored rather than computed.",
      "confidence": 0.6
    }
  ]
}"#;

/// Assemble the full prompt.
///
/// Sections, in order: task, code context, domain knowledge, naming
/// intent, response schema, ordering rule, example. The three inputs are
/// inserted verbatim, each inside its own fenced block. Same inputs always
/// give the same output.
pub fn build_prompt(code_context: &str, user_intent: &str, domain_knowledge: &str) -> String {
    let mut parts = Vec::with_capacity(8);

    parts.push(format!(
        "You are an AI assistant that helps developers name variables and methods.\n\
         Suggest exactly {SUGGESTION_COUNT} identifier names for the placeholder in the code below \
         (written as KV or KM). Names must be concise, descriptive, and idiomatic for the \
         language of the code. Follow the naming intent, which may be written in Japanese, \
         and prefer the project's vocabulary from the domain knowledge. Give a reason for \
         each name and a confidence score between 0.0 and 1.0.\n"
    ));

    parts.push(format!("## Code context\n```\n{code_context}\n```\n"));
    parts.push(format!("## Domain knowledge\n```\n{domain_knowledge}\n```\n"));
    parts.push(format!("## Naming intent\n```\n{user_intent}\n```\n"));

    parts.push(format!(
        "## Response format\n\
         Respond with a single JSON object only, strictly matching this TypeScript interface:\n\n\
         {RESPONSE_SCHEMA}\n"
    ));
    parts.push(
        "The 'suggestions' array must be sorted in descending order of confidence.\n".to_string(),
    );
    parts.push(format!("Example:\n{RESPONSE_EXAMPLE}\n"));

    parts.join("\n")
}
