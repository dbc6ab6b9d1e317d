use std::collections::HashMap;

use crate::errors::GenerationError;
use crate::random::RandomService;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

type TokenGenerator<'a> = Box<dyn Fn() -> Result<String, GenerationError> + 'a>;

/// Resolves `{{token}}` patterns for one category.
///
/// The set of tokens is declared up front; each token maps to the generator
/// that produces its replacement. Resolution scans the pattern once, left to
/// right. A token is generated only if the pattern mentions it, at most once
/// per resolution, and repeated occurrences reuse that value. Generated text
/// is inserted verbatim and never scanned for further tokens.
#[derive(Default)]
pub struct Composer<'a> {
    tokens: Vec<(&'static str, TokenGenerator<'a>)>,
}

impl<'a> Composer<'a> {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn token<F>(mut self, name: &'static str, generator: F) -> Self
    where
        F: Fn() -> Result<String, GenerationError> + 'a,
    {
        self.tokens.push((name, Box::new(generator)));
        self
    }

    pub fn token_names(&self) -> Vec<&'static str> {
        self.tokens.iter().map(|(name, _)| *name).collect()
    }

    fn generator(&self, name: &str) -> Option<&TokenGenerator<'a>> {
        self.tokens
            .iter()
            .find(|(token, _)| *token == name)
            .map(|(_, generator)| generator)
    }

    /// Pick one of `patterns` uniformly and resolve it.
    pub fn compose(
        &self,
        random: &RandomService,
        patterns: &[String],
    ) -> Result<String, GenerationError> {
        let pattern = random.element(patterns)?;
        self.resolve(pattern)
    }

    pub fn resolve(&self, pattern: &str) -> Result<String, GenerationError> {
        let mut out = String::with_capacity(pattern.len());
        let mut resolved: HashMap<&str, String> = HashMap::new();
        let mut rest = pattern;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let name = after[..end].trim();
            if let Some(value) = resolved.get(name) {
                out.push_str(value);
            } else {
                let generator =
                    self.generator(name)
                        .ok_or_else(|| GenerationError::UnresolvedToken {
                            token: name.to_string(),
                            pattern: pattern.to_string(),
                        })?;
                let value = generator()?;
                out.push_str(&value);
                resolved.insert(name, value);
            }
            rest = &after[end + CLOSE.len()..];
        }
        out.push_str(rest);

        tracing::trace!(event = "pattern_resolved", pattern, tokens = resolved.len());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn repeated_token_reuses_one_value() {
        let counter = Cell::new(0);
        let composer = Composer::new().token("n", || {
            counter.set(counter.get() + 1);
            Ok(counter.get().to_string())
        });

        let value = composer.resolve("{{n}}-{{n}}-{{ n }}").expect("resolve");
        assert_eq!(value, "1-1-1");
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn tokens_absent_from_pattern_are_not_generated() {
        let composer = Composer::new()
            .token("a", || Ok("A".to_string()))
            .token("b", || {
                Err(GenerationError::EmptyInput("b should not run".to_string()))
            });
        assert_eq!(composer.resolve("x {{a}} y").expect("resolve"), "x A y");
    }

    #[test]
    fn generated_text_is_not_rescanned() {
        let composer = Composer::new()
            .token("a", || Ok("{{b}}".to_string()))
            .token("b", || Ok("B".to_string()));
        assert_eq!(composer.resolve("{{a}}/{{b}}").expect("resolve"), "{{b}}/B");
    }

    #[test]
    fn unknown_token_fails() {
        let composer = Composer::new().token("a", || Ok("A".to_string()));
        let result = composer.resolve("{{a}} {{zzz}}");
        assert!(matches!(
            result,
            Err(GenerationError::UnresolvedToken { token, .. }) if token == "zzz"
        ));
    }

    #[test]
    fn unterminated_marker_is_literal() {
        let composer = Composer::new().token("a", || Ok("A".to_string()));
        assert_eq!(composer.resolve("{{a}} {{oops").expect("resolve"), "A {{oops");
    }

    #[test]
    fn generator_failure_propagates() {
        let composer = Composer::new().token("a", || {
            Err(GenerationError::InvalidRange("bad".to_string()))
        });
        assert!(matches!(
            composer.resolve("x{{a}}"),
            Err(GenerationError::InvalidRange(_))
        ));
    }
}
