//! Panel valve numbering.

use vr_core::{BufferNumber, OutOfRange};

/// A valve addressable by number on the panel.
///
/// Buffers are `1..=buffer_count`, then the cell valve, then the vacuum
/// valve. The supply valve has no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValveSelector {
    Buffer(BufferNumber),
    Cell,
    Vacuum,
}

impl ValveSelector {
    pub fn from_number(number: i64, buffer_count: usize) -> Result<Self, OutOfRange> {
        let count = i64::try_from(buffer_count).unwrap_or(i64::MAX - 2);
        let number = OutOfRange::check(number, 1, count + 2)?;
        if number == count + 1 {
            Ok(ValveSelector::Cell)
        } else if number == count + 2 {
            Ok(ValveSelector::Vacuum)
        } else {
            BufferNumber::new(number)
                .map(ValveSelector::Buffer)
                .ok_or(OutOfRange::TooHigh)
        }
    }

    /// The panel number of this valve on a rig with `buffer_count` buffers.
    pub fn number(self, buffer_count: usize) -> usize {
        match self {
            ValveSelector::Buffer(n) => n.get() as usize,
            ValveSelector::Cell => buffer_count + 1,
            ValveSelector::Vacuum => buffer_count + 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_for_eight_buffers() {
        assert_eq!(ValveSelector::from_number(0, 8), Err(OutOfRange::TooLow));
        assert_eq!(ValveSelector::from_number(-4, 8), Err(OutOfRange::TooLow));
        assert_eq!(
            ValveSelector::from_number(1, 8),
            Ok(ValveSelector::Buffer(BufferNumber::new(1).unwrap()))
        );
        assert_eq!(
            ValveSelector::from_number(8, 8),
            Ok(ValveSelector::Buffer(BufferNumber::new(8).unwrap()))
        );
        assert_eq!(ValveSelector::from_number(9, 8), Ok(ValveSelector::Cell));
        assert_eq!(ValveSelector::from_number(10, 8), Ok(ValveSelector::Vacuum));
        assert_eq!(ValveSelector::from_number(11, 8), Err(OutOfRange::TooHigh));
    }

    #[test]
    fn number_round_trip() {
        for n in 1..=10 {
            let selector = ValveSelector::from_number(n, 8).unwrap();
            assert_eq!(selector.number(8) as i64, n);
        }
    }
}
