//! Textual `$name` variable substitution.

use log::trace;

use std::borrow::Cow;

use crate::{env::Resolver, Error};

pub(crate) const SIGIL: char = '$';

fn is_name_char(ch: char, is_first: bool) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '.' || (!is_first && ch.is_numeric())
}

/// Returns the byte length of the variable name at the start of `text`.
fn name_len(text: &str) -> usize {
    text.char_indices()
        .find(|&(index, ch)| !is_name_char(ch, index == 0))
        .map_or(text.len(), |(index, _)| index)
}

/// Substitutes all `$name` variables in `text`. Substitution is purely textual and restarts
/// from the beginning of the string after each replacement, so resolved values may themselves
/// contain variables.
pub(crate) fn substitute<'t>(
    text: &'t str,
    resolver: Option<&dyn Resolver>,
    limit: usize,
) -> Result<Cow<'t, str>, Error> {
    if !text.contains(SIGIL) {
        return Ok(Cow::Borrowed(text));
    }

    let mut text = text.to_owned();
    let mut expansions = 0;
    while let Some(start) = text.find(SIGIL) {
        let name_start = start + SIGIL.len_utf8();
        let name_end = name_start + name_len(&text[name_start..]);
        if name_end == name_start {
            return Err(Error::InvalidVariable { index: start });
        }
        let name = &text[name_start..name_end];

        let resolver = resolver.ok_or_else(|| Error::NoResolver(name.to_owned()))?;
        if expansions >= limit {
            return Err(Error::ExpansionLimit { limit });
        }
        let value = resolver.resolve(name);
        if value.trim().is_empty() {
            return Err(Error::UnresolvedVariable(name.to_owned()));
        }
        trace!("substituting `{SIGIL}{name}` with `{value}`");

        text.replace_range(start..name_end, &value);
        expansions += 1;
    }
    Ok(Cow::Owned(text))
}
