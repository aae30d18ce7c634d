//! Compressed identifier list syntax.
//!
//! Lists are whitespace-separated ids where a run of consecutive ids is
//! written as `first to last`, e.g. `1 to 3 5 7 to 8`.

use tessera_foundation::{Error, Result};

const RANGE_KEYWORD: &str = "to";

/// Most ids a single definition may expand to.
pub const MAX_LIST_IDS: usize = 1 << 20;

/// Renders `ids` sorted and de-duplicated, collapsing consecutive runs.
///
/// An empty input renders as an empty string.
#[must_use]
pub fn compress(ids: impl IntoIterator<Item = u32>) -> String {
    let mut ids: Vec<u32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut parts = Vec::new();
    let mut rest = ids.as_slice();
    while let Some((&start, _)) = rest.split_first() {
        let run = rest
            .windows(2)
            .take_while(|w| w[0].checked_add(1) == Some(w[1]))
            .count();
        let end = rest[run];
        if run == 0 {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start} {RANGE_KEYWORD} {end}"));
        }
        rest = &rest[run + 1..];
    }
    parts.join(" ")
}

/// Parses a compressed list back into ids, in the order written.
///
/// # Errors
///
/// Returns an invalid list definition error for unknown tokens, a range
/// with a missing bound, a descending range, or a definition expanding to
/// more than [`MAX_LIST_IDS`] ids. Nothing is allocated past the limit.
pub fn expand(definition: &str) -> Result<Vec<u32>> {
    let mut ids = Vec::new();
    let mut tokens = definition.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        if token.eq_ignore_ascii_case(RANGE_KEYWORD) {
            return Err(Error::invalid_list(definition, "range has no lower bound"));
        }
        let start = parse_id(definition, token)?;
        let is_range = tokens
            .peek()
            .is_some_and(|next| next.eq_ignore_ascii_case(RANGE_KEYWORD));
        if !is_range {
            reserve(definition, &ids, 0)?;
            ids.push(start);
            continue;
        }
        tokens.next();
        let end = tokens
            .next()
            .ok_or_else(|| Error::invalid_list(definition, "range has no upper bound"))
            .and_then(|t| parse_id(definition, t))?;
        if end < start {
            return Err(Error::invalid_list(
                definition,
                format!("range {start} {RANGE_KEYWORD} {end} is descending"),
            ));
        }
        reserve(definition, &ids, end - start)?;
        ids.extend(start..=end);
    }
    Ok(ids)
}

/// Fails unless `ids` has room for `extra + 1` more entries.
fn reserve(definition: &str, ids: &[u32], extra: u32) -> Result<()> {
    let room = MAX_LIST_IDS - ids.len();
    let needed = usize::try_from(extra).map_or(usize::MAX, |n| n.saturating_add(1));
    if needed > room {
        return Err(Error::invalid_list(
            definition,
            format!("expands to more than {MAX_LIST_IDS} ids"),
        ));
    }
    Ok(())
}

fn parse_id(definition: &str, token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| Error::invalid_list(definition, format!("{token:?} is not an id")))
}
