/// Join an optional base URL and an API path
///
/// A non-blank base is trimmed of surrounding whitespace and all trailing
/// slashes, and the path gets exactly one leading slash. A blank or missing
/// base leaves the path as given, for same-origin requests.
pub fn build_url(base: Option<&str>, path: &str) -> String {
    match base {
        Some(base) if !base.trim().is_empty() => {
            let base = base.trim().trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{}/{}", base, path)
        }
        _ => path.to_string(),
    }
}
