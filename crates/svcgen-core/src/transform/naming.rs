//! Deterministic identifier derivations for routes and namespaces.

use crate::conventions::PATH_PARAM;

/// Convert a route path to a PascalCase identifier fragment.
///
/// A word character at the start of the string or following a `/` or `-`
/// is uppercased and the separator dropped; everything else passes through
/// untouched. Brace placeholders therefore survive (`/users/{id}` →
/// `Users/{id}`) until [`strip_braces`] removes them.
///
/// `/daily-task/import` → `DailyTaskImport`
pub fn path_to_pascal_case(path: &str) -> String {
    let chars: Vec<char> = path.chars().collect();
    let mut out = String::with_capacity(path.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if (c == '/' || c == '-') && i + 1 < chars.len() && is_word(chars[i + 1]) {
            out.extend(chars[i + 1].to_uppercase());
            i += 2;
        } else if i == 0 && is_word(c) {
            out.extend(c.to_uppercase());
            i += 1;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Truncate at the first `{`, greedily to the end of the string:
/// `deleteThing{id}` → `deleteThing`, and `{id}/sub` loses `/sub` entirely.
pub fn strip_braces(s: &str) -> String {
    match s.find('{') {
        Some(i) => s[..i].to_string(),
        None => s.to_string(),
    }
}

/// `true` only for the literal `{id}` placeholder; `{userId}` and friends
/// are not parameterized routes.
pub fn is_param_path(path: &str) -> bool {
    path.contains(PATH_PARAM)
}

/// Namespace identifier grouping one operation's type members:
/// `NS` + Pascal(method) + Pascal(path) with the brace run removed.
pub fn namespace(method: &str, path: &str) -> String {
    format!(
        "NS{}{}",
        path_to_pascal_case(method),
        strip_braces(&path_to_pascal_case(path))
    )
}

/// Callable name for the generated service function, e.g. `getWidgets`.
pub fn operation_name(method: &str, path: &str) -> String {
    format!("{}{}", method, strip_braces(&path_to_pascal_case(path)))
}

/// Concrete request path: every `{id}` placeholder becomes a
/// template-literal interpolation of the `id` argument.
pub fn request_path(path: &str) -> String {
    if is_param_path(path) {
        path.replace(PATH_PARAM, "${id}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_pascal_case() {
        assert_eq!(path_to_pascal_case("/daily-task/import"), "DailyTaskImport");
        assert_eq!(path_to_pascal_case("get"), "Get");
        assert_eq!(path_to_pascal_case("/widgets"), "Widgets");
        // the `/` before a brace has no word character to consume, so it stays
        assert_eq!(path_to_pascal_case("/users/{id}"), "Users/{id}");
    }

    #[test]
    fn test_strip_braces() {
        assert_eq!(strip_braces("deleteThing{id}"), "deleteThing");
        assert_eq!(strip_braces("{id}/sub"), "");
        assert_eq!(strip_braces("NoBraces"), "NoBraces");
    }

    #[test]
    fn test_is_param_path() {
        assert!(is_param_path("/users/{id}"));
        assert!(!is_param_path("/users/{userId}"));
        assert!(!is_param_path("/users"));
    }

    #[test]
    fn test_namespace() {
        assert_eq!(namespace("get", "/widgets"), "NSGetWidgets");
        assert_eq!(namespace("post", "/daily-task/import"), "NSPostDailyTaskImport");
    }

    #[test]
    fn test_operation_name() {
        assert_eq!(operation_name("get", "/widgets"), "getWidgets");
        assert_eq!(operation_name("put", "/daily-task/import"), "putDailyTaskImport");
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("/users/{id}"), "/users/${id}");
        assert_eq!(request_path("/users"), "/users");
        assert_eq!(request_path("/users/{userId}"), "/users/{userId}");
    }
}
