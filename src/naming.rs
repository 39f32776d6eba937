//! Application name derivation.
//!
//! Case conversion itself comes from [`heck`]; this module only decides
//! whether the schema title is usable at all.

use heck::ToLowerCamelCase;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

/// Name used whenever the schema title cannot be turned into an identifier.
pub const DEFAULT_APP_NAME: &str = "customApiHandler";

/// 1 to 40 ASCII word characters or hyphens.
static VALID_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,40}$").expect("application name pattern is valid")
});

/// Derives the application name from the schema title.
///
/// A title made of 1 to 40 word characters or hyphens is converted to
/// camelCase. Anything else, including a title with no letters or digits,
/// silently yields [`DEFAULT_APP_NAME`], so the result does not necessarily
/// reflect the title.
///
/// # Examples
/// ```
/// use swagger_routegen::naming::derive_app_name;
///
/// assert_eq!(derive_app_name(Some("Swagger-Petstore")), "swaggerPetstore");
/// assert_eq!(derive_app_name(Some("My App")), "customApiHandler");
/// assert_eq!(derive_app_name(None), "customApiHandler");
/// ```
pub fn derive_app_name(title: Option<&str>) -> String {
    let derived = title
        .filter(|t| is_valid_name(t))
        .map(|t| t.to_lower_camel_case())
        .filter(|name| !name.is_empty());

    match derived {
        Some(name) => {
            debug!("Application name {:?} derived from title {:?}", name, title);
            name
        }
        None => {
            warn!(
                "Title {:?} is not a usable name, falling back to {}",
                title.unwrap_or(""),
                DEFAULT_APP_NAME
            );
            DEFAULT_APP_NAME.to_string()
        }
    }
}

/// Checks the title contains only supported characters.
pub fn is_valid_name(value: &str) -> bool {
    VALID_NAME.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_title_is_camel_cased() {
        assert_eq!(derive_app_name(Some("petstore")), "petstore");
        assert_eq!(derive_app_name(Some("Swagger-Petstore")), "swaggerPetstore");
        assert_eq!(derive_app_name(Some("find_pets_by_status")), "findPetsByStatus");
        assert_eq!(derive_app_name(Some("HTTPServer")), "httpServer");
    }

    #[test]
    fn test_invalid_titles_fall_back() {
        assert_eq!(derive_app_name(Some("Swagger Petstore")), DEFAULT_APP_NAME);
        assert_eq!(derive_app_name(Some("")), DEFAULT_APP_NAME);
        assert_eq!(derive_app_name(Some("api!")), DEFAULT_APP_NAME);
        assert_eq!(derive_app_name(Some("é")), DEFAULT_APP_NAME);
        assert_eq!(derive_app_name(None), DEFAULT_APP_NAME);
    }

    #[test]
    fn test_separator_only_titles_fall_back() {
        assert!(is_valid_name("_"));
        assert!(is_valid_name("---"));
        assert_eq!(derive_app_name(Some("_")), DEFAULT_APP_NAME);
        assert_eq!(derive_app_name(Some("---")), DEFAULT_APP_NAME);
        assert_eq!(derive_app_name(Some("-_-")), DEFAULT_APP_NAME);
    }

    #[test]
    fn test_length_limit() {
        let forty = "a".repeat(40);
        let forty_one = "a".repeat(41);
        assert!(is_valid_name(&forty));
        assert!(!is_valid_name(&forty_one));
        assert_eq!(derive_app_name(Some(&forty_one)), DEFAULT_APP_NAME);
    }
}
