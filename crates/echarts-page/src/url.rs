//! Public URL resolution for stored artifacts.

/// Join the configured public base with the fixed `/charts/<file>` suffix.
///
/// Pure function of its inputs. Trailing slashes on the base are stripped;
/// nothing else is validated — a malformed base is the operator's problem.
pub fn resolve_public_url(base: &str, file_name: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/charts/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_base() {
        assert_eq!(
            resolve_public_url("http://localhost:8989", "echarts_1.html"),
            "http://localhost:8989/charts/echarts_1.html"
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        assert_eq!(
            resolve_public_url("https://charts.example.com/", "echarts_1.html"),
            "https://charts.example.com/charts/echarts_1.html"
        );
    }

    #[test]
    fn test_multiple_trailing_slashes_stripped() {
        assert_eq!(
            resolve_public_url("http://localhost:8989///", "a.html"),
            "http://localhost:8989/charts/a.html"
        );
    }
}
