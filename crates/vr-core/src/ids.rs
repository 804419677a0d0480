use core::fmt;
use core::num::NonZeroU32;

/// 1-based buffer number as it appears on the front panel and the wire.
///
/// - `NonZero` keeps the 1-based contract in the type
/// - `Option<BufferNumber>` is the same size as `BufferNumber`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferNumber(NonZeroU32);

impl BufferNumber {
    /// Accept a raw panel number; `None` for anything below 1 or above `u32::MAX`.
    pub fn new(number: i64) -> Option<Self> {
        u32::try_from(number)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    /// Build from a 0-based position in the buffer list.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    /// The 1-based panel number.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Recover the 0-based position.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for BufferNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BufferNumber({})", self.get())
    }
}

impl fmt::Display for BufferNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Which side of a valid range a requested number fell on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutOfRange {
    TooLow,
    TooHigh,
}

impl OutOfRange {
    /// Classify `value` against the inclusive range `[low, high]`.
    pub fn check(value: i64, low: i64, high: i64) -> Result<i64, OutOfRange> {
        if value < low {
            Err(OutOfRange::TooLow)
        } else if value > high {
            Err(OutOfRange::TooHigh)
        } else {
            Ok(value)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutOfRange::TooLow => "Too Low",
            OutOfRange::TooHigh => "Too High",
        }
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
