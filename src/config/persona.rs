use log::info;
use std::error::Error;
use std::fs;
use std::sync::Arc;

/// Built-in persona preamble, used when no override file is configured.
pub const DEFAULT_PERSONA: &str = include_str!("../../persona/default.md");

/// Loads the persona preamble once at startup. The result is shared read-only
/// by every request.
pub fn load_persona(path: Option<&str>) -> Result<Arc<str>, Box<dyn Error + Send + Sync>> {
    let text = match path {
        Some(p) if !p.trim().is_empty() => {
            let content = fs::read_to_string(p)
                .map_err(|e| format!("Failed to read persona file '{}': {}", p, e))?;
            info!("Loaded persona preamble from '{}' ({} bytes)", p, content.len());
            content
        }
        _ => DEFAULT_PERSONA.to_string(),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Persona preamble is empty".into());
    }
    Ok(Arc::from(trimmed))
}
