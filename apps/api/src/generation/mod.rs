// The AI task layer: prompt construction, model output interpretation, and
// deterministic fallback. All model calls go through llm_client.

pub mod engine;
pub mod fallback;
pub mod handlers;
pub mod interpret;
pub mod prompts;
