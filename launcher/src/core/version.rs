//! Parsing of the interpreter's `--version` banner.

/// Extract the version number from output such as `Python 3.11.4`.
///
/// Older interpreters print the banner on stderr, so callers pass the combined
/// stdout/stderr text. Returns the first line that looks like
/// `<name> <digits>[.<more>]`.
pub fn parse_version_banner(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        let _name = parts.next()?;
        let version = parts.next()?;
        let starts_with_digit = version.chars().next().is_some_and(|c| c.is_ascii_digit());
        starts_with_digit.then(|| version.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stdout_banner() {
        assert_eq!(
            parse_version_banner("Python 3.11.4\n"),
            Some("3.11.4".to_string())
        );
    }

    #[test]
    fn skips_noise_before_banner() {
        let output = "warning: something odd\nPython 2.7.18\n";
        assert_eq!(parse_version_banner(output), Some("2.7.18".to_string()));
    }

    #[test]
    fn rejects_output_without_version() {
        assert_eq!(parse_version_banner(""), None);
        assert_eq!(parse_version_banner("command not found"), None);
    }
}
