pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Trims the input, assumes `http://` when no scheme is given and drops
/// trailing slashes. Blank input falls back to the local default.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
