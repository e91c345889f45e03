//! Shell text helpers shared by the emitter and the catalog normalizer

/// Quote a string as a single POSIX shell word
///
/// The result is wrapped in single quotes; embedded single quotes become `'\''`.
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

/// Default "already installed" probe for a tool without an explicit check
pub fn default_check_command(id: &str) -> String {
    format!("command -v {} >/dev/null 2>&1", shell_quote(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(shell_quote("git"), "'git'");
    }

    #[test]
    fn test_quote_embedded_single_quote() {
        assert_eq!(shell_quote("Don't panic"), "'Don'\\''t panic'");
    }

    #[test]
    fn test_quote_neutralizes_expansion() {
        assert_eq!(shell_quote("$(rm -rf ~)"), "'$(rm -rf ~)'");
    }

    #[test]
    fn test_default_check_command() {
        assert_eq!(default_check_command("gh"), "command -v 'gh' >/dev/null 2>&1");
    }
}
