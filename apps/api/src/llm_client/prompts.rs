// Cross-cutting prompt fragments shared by the task prompts in
// generation::prompts. Task-specific templates live next to their task.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every task prompt: the model may only restate
/// what the user provided, never invent facts or metrics.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Do NOT fabricate any information, metrics, employers, dates, \
    or credentials. Use only the facts provided in the input. If a detail \
    is missing, leave the corresponding field empty rather than inventing it.";
