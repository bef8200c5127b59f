// Cross-cutting prompt fragments.
// Each stage that needs LLM calls defines its own prompts alongside it.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose output is parsed into a typed struct.
pub const SCHEMA_INSTRUCTION: &str = "\
    Return a JSON object with EXACTLY the fields of the schema below. \
    Every field is required. Do not add fields.";

/// A stage system prompt: the stage's role followed by the JSON-only rules.
pub fn json_only_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}
