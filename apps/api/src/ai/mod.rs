// AI adapter: best-effort generative features for the portal.
// Every call resolves to a value of its declared shape; failures become fallbacks.
// All completions go through llm_client — no direct HTTP calls here.

pub mod adapter;
pub mod prompts;
