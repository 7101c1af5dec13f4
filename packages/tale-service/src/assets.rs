use uuid::Uuid;

/// Resolves a stored cover art path to the URL readers fetch it from.
///
/// Paths that are already absolute `http(s)` URLs are passed through untouched. Relative
/// paths live under `{base_url}/{owner_id}/{story_id}/`.
pub fn cover_art_url(
	base_url: &str,
	owner_id: i64,
	story_id: Uuid,
	path: Option<&str>,
) -> Option<String> {
	let path = path.map(str::trim).filter(|path| !path.is_empty())?;

	if path.starts_with("http://") || path.starts_with("https://") {
		return Some(path.to_string());
	}

	let relative = path.trim_start_matches('/');

	if relative.is_empty() {
		return None;
	}

	Some(format!("{}/{owner_id}/{story_id}/{relative}", base_url.trim_end_matches('/')))
}
