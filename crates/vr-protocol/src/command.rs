//! Command tokenising.

/// Raw arguments following the command token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> Args<'a> {
    pub fn new(tokens: Vec<&'a str>) -> Self {
        Self { tokens }
    }

    pub fn get(&self, i: usize) -> Option<&'a str> {
        self.tokens.get(i).copied()
    }

    /// Integer argument `i`; missing or unparsable arguments read as 0.
    pub fn int(&self, i: usize) -> i64 {
        self.get(i).and_then(|s| s.parse().ok()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub name: &'a str,
    pub args: Args<'a>,
}

impl<'a> Command<'a> {
    /// Split on whitespace; `None` for a blank line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        Some(Self {
            name,
            args: Args::new(tokens.collect()),
        })
    }
}
