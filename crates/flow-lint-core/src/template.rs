//! Positional placeholder substitution for code messages.

/// Placeholder token used when none is configured.
pub const DEFAULT_PLACEHOLDER: &str = "%";

/// Renders message and recommendation templates.
///
/// Each placeholder occurrence takes the next argument in order. Surplus
/// arguments are ignored and placeholders without an argument stay literal.
/// Only the template text is scanned, so a placeholder token inside an
/// argument is never substituted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    token: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}

impl Template {
    /// Creates a template renderer using `token` as the placeholder.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the placeholder token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Substitutes `args` into `template`, one placeholder per argument.
    #[must_use]
    pub fn render<S: AsRef<str>>(&self, template: &str, args: &[S]) -> String {
        if self.token.is_empty() || args.is_empty() {
            return template.to_string();
        }

        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        let mut args = args.iter();

        while let Some(pos) = rest.find(self.token.as_str()) {
            let Some(arg) = args.next() else {
                break;
            };
            output.push_str(&rest[..pos]);
            output.push_str(arg.as_ref());
            rest = &rest[pos + self.token.len()..];
        }

        output.push_str(rest);
        output
    }
}

/// Renders `template` with the default `%` placeholder.
#[must_use]
pub fn render<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    Template::default().render(template, args)
}
