// Adapters layer: concrete clients for the external services behind the ports.

pub mod groq;
pub mod supabase;

pub use groq::GroqClient;
pub use supabase::SupabaseClient;

/// Pulls a human-readable message out of a provider error body.
///
/// Understands the shapes returned by the completion API
/// (`{"error": {"message"}}`), PostgREST (`{"message"}`) and the auth
/// server (`{"msg"}` / `{"error_description"}`). Plain-text bodies are
/// returned as-is.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    for pointer in ["/error/message", "/message", "/msg", "/error_description", "/error"] {
        if let Some(message) = value.pointer(pointer).and_then(serde_json::Value::as_str) {
            return Some(message.to_string());
        }
    }
    None
}
