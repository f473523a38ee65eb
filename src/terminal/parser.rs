//! Command line parser
//!
//! Single pass over the line, splitting on the ASCII space. The first token
//! is the command name; every later token is checked against the token
//! before it, and a `-flag value` pair lands in the argument map.

use heapless::{FnvIndexMap, String};

/// Maximum stored length of a flag or value token. Longer tokens are
/// clipped at a character boundary.
pub const ARG_TOKEN_SIZE: usize = 32;

/// Maximum number of pending flags. Inserts past this are dropped.
pub const MAX_ARGS: usize = 8;

/// One stored flag or value token
pub type ArgToken = String<ARG_TOKEN_SIZE>;

/// Flag-to-value map filled by [`parse_line`].
///
/// Handlers read it during their invocation window; the dispatcher clears
/// it after every successful command, so nothing stale survives into the
/// next one.
pub struct ArgMap {
    entries: FnvIndexMap<ArgToken, ArgToken, MAX_ARGS>,
}

impl ArgMap {
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
        }
    }

    /// Value recorded for `flag`, e.g. `args.get("-x")`
    pub fn get(&self, flag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == flag)
            .map(|(_, value)| value.as_str())
    }

    /// All recorded flag/value pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // Last occurrence of a flag wins; past capacity new flags are dropped.
    pub(crate) fn insert(&mut self, key: ArgToken, value: ArgToken) {
        let _ = self.entries.insert(key, value);
    }
}

impl Default for ArgMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a completed line into the command name and flag arguments.
///
/// Flags pair with the token that follows them: `cmd -x 1 -y 2` yields
/// `{-x: 1, -y: 2}`. A trailing flag with no following token never enters
/// the map. Consecutive spaces produce empty tokens which take part in the
/// pairing like any other token; that quirk is kept, not special-cased.
/// The map is not cleared here: entries only leave it when a dispatch
/// succeeds.
pub fn parse_line<'a>(line: &'a str, args: &mut ArgMap) -> &'a str {
    let mut tokens = line.split(' ');

    let command = tokens.next().unwrap_or("");

    let mut previous = command;
    for token in tokens {
        if previous.starts_with('-') {
            args.insert(clipped(previous), clipped(token));
        }
        previous = token;
    }

    command
}

/// Copy a token into bounded storage, clipping past capacity
fn clipped(token: &str) -> ArgToken {
    let mut stored = ArgToken::new();
    for ch in token.chars() {
        if stored.push(ch).is_err() {
            break;
        }
    }
    stored
}
