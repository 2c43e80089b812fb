//! Image URL decoration with configured processing parameters.

/// Appends image processing parameters to `url`.
///
/// Parameters such as `imageView2/2/w/800` come from configuration and are
/// attached as a query string, or joined to an existing one with `&`. Empty
/// parameters leave the URL untouched.
///
/// # Arguments
///
/// * `url`: Image URL, with or without a query string
/// * `params`: Configured parameters without a leading `?` or `&`
pub fn image_url(url: &str, params: &str) -> String {
    let params = params.trim_start_matches(['?', '&']);
    if params.is_empty() {
        return url.to_string();
    }

    let separator = match url.find('?') {
        Some(pos) if pos + 1 == url.len() || url.ends_with('&') => "",
        Some(_) => "&",
        None => "?",
    };

    format!("{}{}{}", url, separator, params)
}
