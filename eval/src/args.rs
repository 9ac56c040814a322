//! Splitting raw function args.

use core::iter::FusedIterator;

/// Splits off the first argument from comma-separated `args`, returning the trimmed argument
/// and the trimmed remainder. Commas nested in parens (e.g., in a nested function call)
/// do not split.
///
/// If `args` contain no top-level comma, the whole `args` is returned as the first element
/// and the remainder is empty.
///
/// # Examples
///
/// ```
/// # use infix_eval::next_arg;
/// assert_eq!(next_arg("f(1, 2), 3"), ("f(1, 2)", "3"));
/// assert_eq!(next_arg(" a , b, c"), ("a", "b, c"));
/// assert_eq!(next_arg("x + 1"), ("x + 1", ""));
/// ```
pub fn next_arg(args: &str) -> (&str, &str) {
    let mut depth = 0_usize;
    for (index, ch) in args.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return (args[..index].trim(), args[index + 1..].trim()),
            _ => { /* other chars do not influence splitting */ }
        }
    }
    (args.trim(), "")
}

/// Iterates over all top-level arguments in `args` using [`next_arg()`].
/// Blank `args` contain no arguments.
///
/// # Examples
///
/// ```
/// # use infix_eval::split_args;
/// let args: Vec<_> = split_args("1, max(2, 3), , 4").collect();
/// assert_eq!(args, ["1", "max(2, 3)", "", "4"]);
/// assert_eq!(split_args("  ").count(), 0);
/// ```
pub fn split_args(args: &str) -> SplitArgs<'_> {
    SplitArgs {
        rest: args,
        exhausted: args.trim().is_empty(),
    }
}

/// Iterator returned by [`split_args()`].
#[derive(Debug, Clone)]
pub struct SplitArgs<'a> {
    rest: &'a str,
    exhausted: bool,
}

impl<'a> Iterator for SplitArgs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let (arg, rest) = next_arg(self.rest);
        // `next_arg` returns an empty remainder both for the last arg and for a trailing comma;
        // the latter is treated as the end of args.
        self.exhausted = rest.is_empty();
        self.rest = rest;
        Some(arg)
    }
}

impl FusedIterator for SplitArgs<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitting_nested_args() {
        assert_eq!(next_arg("f(1,2),3"), ("f(1,2)", "3"));
        assert_eq!(next_arg("(a, (b, c)), d, e"), ("(a, (b, c))", "d, e"));
        assert_eq!(next_arg(""), ("", ""));
        assert_eq!(next_arg(", x"), ("", "x"));
    }

    #[test]
    fn unbalanced_parens_do_not_panic() {
        assert_eq!(next_arg("a), b"), ("a)", "b"));
        assert_eq!(next_arg("(a, b"), ("(a, b", ""));
    }

    #[test]
    fn iterating_over_args() {
        let args: Vec<_> = split_args("$foo > $bar, yes, no").collect();
        assert_eq!(args, ["$foo > $bar", "yes", "no"]);
        let args: Vec<_> = split_args("single").collect();
        assert_eq!(args, ["single"]);
        let args: Vec<_> = split_args("a,").collect();
        assert_eq!(args, ["a"]);
    }
}
