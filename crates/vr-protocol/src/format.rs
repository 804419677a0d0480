//! Reply field formatting.

/// Width of gas name fields.
pub const NAME_WIDTH: usize = 20;

/// Left-aligned, padded or truncated to [`NAME_WIDTH`] characters.
pub fn name_field(name: &str) -> String {
    format!("{:<w$.w$}", name, w = NAME_WIDTH)
}

/// Buffer and valve numbers.
pub fn number_field(n: i64) -> String {
    format!("{n:02}")
}

/// Gas indices.
pub fn gas_field(index: i64) -> String {
    format!("{index:03}")
}

/// Pressures, temperatures and targets.
pub fn real_field(v: f64) -> String {
    format!("{v:09.2}")
}

pub fn open_flag(open: bool) -> char {
    if open { 'O' } else { 'C' }
}

pub fn enabled_flag(enabled: bool) -> char {
    if enabled { 'E' } else { 'D' }
}
