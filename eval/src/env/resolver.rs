//! Variable resolvers.

use core::hash::BuildHasher;
use std::collections::{BTreeMap, HashMap};

/// Provider of substitution text for `$name` variables.
///
/// Returning a blank string signals that the variable is unknown; the evaluation then fails
/// with [`Error::UnresolvedVariable`](crate::Error::UnresolvedVariable).
///
/// The trait is implemented for closures `Fn(&str) -> String` and string maps.
///
/// # Examples
///
/// ```
/// use infix_eval::{Environment, Error, Value};
///
/// let env = Environment::<f64>::standard_float()
///     .with_resolver(|name: &str| if name == "two" { "2".to_owned() } else { String::new() });
/// assert_eq!(env.evaluate("$two * 3")?, Value::Number(6.0));
/// assert!(env.evaluate("$three").is_err());
/// # Ok::<_, Error>(())
/// ```
pub trait Resolver {
    /// Returns the text to substitute for the variable `name` (without the `$` sigil).
    fn resolve(&self, name: &str) -> String;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, name: &str) -> String {
        self(name)
    }
}

impl<V: AsRef<str>, S: BuildHasher> Resolver for HashMap<String, V, S> {
    fn resolve(&self, name: &str) -> String {
        self.get(name)
            .map_or_else(String::new, |value| value.as_ref().to_owned())
    }
}

impl<V: AsRef<str>> Resolver for BTreeMap<String, V> {
    fn resolve(&self, name: &str) -> String {
        self.get(name)
            .map_or_else(String::new, |value| value.as_ref().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_resolvers() {
        let map: HashMap<String, &str> = [("x".to_owned(), "1")].into();
        assert_eq!(map.resolve("x"), "1");
        assert_eq!(map.resolve("y"), "");

        let map: BTreeMap<String, String> = [("a.b".to_owned(), "2 + 2".to_owned())].into();
        assert_eq!(map.resolve("a.b"), "2 + 2");
    }

    #[test]
    fn closure_resolver() {
        let resolver = |name: &str| name.to_uppercase();
        assert_eq!(Resolver::resolve(&resolver, "foo"), "FOO");
    }
}
