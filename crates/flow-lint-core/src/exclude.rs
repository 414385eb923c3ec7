//! Parsing of `ruleId.codeId[,ruleId.codeId...]` exclusion specs.

use tracing::warn;

/// One `ruleId.codeId` pair from an exclusion spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludeToken<'a> {
    /// Rule the exclusion targets.
    pub rule_id: &'a str,
    /// Code to suppress.
    pub code_id: &'a str,
}

/// Splits an exclusion spec into `ruleId.codeId` pairs.
///
/// Whitespace around tokens is ignored. Tokens without a code id (a bare
/// `ruleId`, `ruleId.`) are skipped with a warning; anything after a second
/// `.` is ignored.
pub fn parse_exclude_spec(spec: &str) -> impl Iterator<Item = ExcludeToken<'_>> {
    spec.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let mut parts = token.split('.');
            let rule_id = parts.next().unwrap_or_default();
            match parts.next() {
                Some(code_id) if !rule_id.is_empty() && !code_id.is_empty() => {
                    Some(ExcludeToken { rule_id, code_id })
                }
                _ => {
                    warn!(token, "ignoring malformed exclude token, expected ruleId.codeId");
                    None
                }
            }
        })
}
