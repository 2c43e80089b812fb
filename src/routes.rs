//! Named route resolution for notification deep links.

use anyhow::{Context, Result, bail};
use std::collections::HashMap;

/// Route showing a course page.
pub const COURSE_SHOW: &str = "course.show";

/// Route showing a single video of a course.
pub const VIDEO_SHOW: &str = "video.show";

/// Builds URLs from a route name and positional path parameters.
pub trait LinkBuilder: Send + Sync {
    /// Resolves `name` with `params` filled into its placeholders in order.
    ///
    /// # Errors
    ///
    /// Returns error if the route is unknown or the parameter count differs
    /// from the number of placeholders.
    fn route(&self, name: &str, params: &[&str]) -> Result<String>;
}

/// Route templates keyed by name.
///
/// Templates use `{name}` placeholders which are filled positionally, so
/// `/course/{id}/{slug}` with `["3", "rust"]` becomes `/course/3/rust`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_url: String,
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Creates an empty table producing links relative to `base_url`.
    ///
    /// An empty base produces root relative links.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            routes: HashMap::new(),
        }
    }

    /// Creates a table with the course and video routes registered.
    pub fn with_defaults(base_url: impl Into<String>) -> Self {
        Self::new(base_url)
            .with_route(COURSE_SHOW, "/course/{id}/{slug}")
            .with_route(VIDEO_SHOW, "/course/{course_id}/video/{id}/{slug}")
    }

    /// Registers or replaces a route template.
    pub fn with_route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(name.into(), template.into());
        self
    }

    fn fill(template: &str, params: &[&str]) -> Result<String> {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        let mut params = params.iter();

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let close = rest[open..]
                .find('}')
                .map(|p| open + p)
                .with_context(|| format!("Unterminated placeholder in route: {}", template))?;
            let placeholder = &rest[open + 1..close];

            let value = params
                .next()
                .with_context(|| format!("Missing route parameter '{}'", placeholder))?;
            if value.is_empty() {
                bail!("Empty route parameter '{}'", placeholder);
            }
            result.push_str(value);
            rest = &rest[close + 1..];
        }
        result.push_str(rest);

        if params.next().is_some() {
            bail!("Too many parameters for route: {}", template);
        }

        Ok(result)
    }
}

impl LinkBuilder for RouteTable {
    fn route(&self, name: &str, params: &[&str]) -> Result<String> {
        let template = self
            .routes
            .get(name)
            .with_context(|| format!("Route not defined: {}", name))?;
        let path = Self::fill(template, params)?;

        Ok(format!("{}{}", self.base_url, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_route() {
        // Arrange
        let routes = RouteTable::with_defaults("");

        // Act
        let url = routes
            .route(COURSE_SHOW, &["3", "intro-to-rust"])
            .expect("Should resolve");

        // Assert
        assert_eq!(url, "/course/3/intro-to-rust");
    }

    #[test]
    fn test_video_route_with_base_url() {
        // Arrange
        let routes = RouteTable::with_defaults("https://example.com/");

        // Act
        let url = routes
            .route(VIDEO_SHOW, &["3", "17", "ownership"])
            .expect("Should resolve");

        // Assert
        assert_eq!(url, "https://example.com/course/3/video/17/ownership");
    }

    #[test]
    fn test_unknown_route() {
        let routes = RouteTable::with_defaults("");

        let result = routes.route("article.show", &["1"]);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("article.show"));
    }

    #[test]
    fn test_missing_parameter() {
        let routes = RouteTable::with_defaults("");

        let result = routes.route(COURSE_SHOW, &["3"]);

        assert!(result.is_err(), "Slug placeholder should be required");
    }

    #[test]
    fn test_empty_parameter_rejected() {
        let routes = RouteTable::with_defaults("");

        let result = routes.route(COURSE_SHOW, &["3", ""]);

        assert!(result.is_err());
    }

    #[test]
    fn test_extra_parameter_rejected() {
        let routes = RouteTable::with_defaults("");

        let result = routes.route(COURSE_SHOW, &["3", "slug", "extra"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_custom_route_without_placeholders() {
        let routes = RouteTable::new("").with_route("home", "/");

        assert_eq!(routes.route("home", &[]).unwrap(), "/");
    }
}
