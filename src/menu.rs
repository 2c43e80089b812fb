//! Navigation menu highlighting.

use regex::Regex;

/// CSS class applied to the active menu item.
pub const ACTIVE_CLASS: &str = "active";

/// Whether the menu item for `route_name` is active on `current_route`.
///
/// Names compare case insensitively. A nested current route such as
/// `member.course.show` also activates items whose name contains its parent
/// prefix `member.course` followed by anything other than `_`.
///
/// # Arguments
///
/// * `route_name`: Route the menu item points at
/// * `current_route`: Route of the page being served
pub fn is_active(route_name: &str, current_route: &str) -> bool {
    let route_name = route_name.to_lowercase();
    let current = current_route.to_lowercase();

    if route_name == current {
        return true;
    }

    let Some((parent, _)) = current.rsplit_once('.') else {
        return false;
    };

    match Regex::new(&format!("{}[^_]", regex::escape(parent))) {
        Ok(pattern) => pattern.is_match(&route_name),
        Err(e) => {
            tracing::warn!(route = %current, error = %e, "Invalid menu route pattern");
            false
        }
    }
}

/// Returns [`ACTIVE_CLASS`] for the active menu item and an empty string otherwise.
pub fn active_class(route_name: &str, current_route: &str) -> &'static str {
    if is_active(route_name, current_route) {
        ACTIVE_CLASS
    } else {
        ""
    }
}
