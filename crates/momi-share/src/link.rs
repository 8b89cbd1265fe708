use url::Url;

use momi_core::error::MomiError;

/// Path segment that precedes the token in a share link.
pub const IMPORT_SEGMENT: &str = "importer";

/// Build `<base>/importer/<token>`, keeping any path `base` already has.
pub fn share_link(base: &Url, token: &str) -> Result<Url, MomiError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| MomiError::Config {
            message: format!("share base url cannot carry a path: {base}"),
        })?
        .pop_if_empty()
        .push(IMPORT_SEGMENT)
        .push(token);
    Ok(url)
}

/// Pull the token out of a pasted share link.
///
/// Accepts a full URL, any text containing `importer/`, or a bare token.
pub fn token_from_link(input: &str) -> String {
    let input = input.trim();
    if let Ok(url) = Url::parse(input) {
        if let Some(segments) = url.path_segments() {
            let mut segments = segments.skip_while(|s| *s != IMPORT_SEGMENT);
            if segments.next().is_some() {
                return segments.next().unwrap_or_default().to_string();
            }
        }
    }
    let marker = format!("{IMPORT_SEGMENT}/");
    match input.rfind(&marker) {
        Some(at) => input[at + marker.len()..]
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
        None => input.to_string(),
    }
}
