use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// # Format
///
/// `B[0-8]*/S[0-8]*`, case insensitive, the `/` is optional.
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Empty rule string")]
    Empty,

    #[error("Unexpected character '{0}' in rule string")]
    InvalidChar(char),

    #[error("Neighbour count {0} is out of range, expected 0 to 8")]
    OutOfRange(u32),

    #[error("Rule string must start with 'B'")]
    MissingBirth,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// State of a cell in the next generation, given whether it is alive now and how many of
    /// its 8 neighbours are alive.
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if neighbors > 8 {
            return false;
        }

        let mask = 1 << neighbors;

        if alive {
            self.survivals() & mask == mask
        } else {
            self.births() & mask == mask
        }
    }
}

impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Start,
            Birth,
            Survival,
        }

        if s.trim().is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut state = State::Start;
        let (mut b, mut s_bits) = (0u16, 0u16);

        for c in s.trim().chars() {
            match (c, &state) {
                ('b' | 'B', State::Start) => {
                    state = State::Birth;
                }
                ('/', State::Birth) => {}
                ('s' | 'S', State::Birth) => {
                    state = State::Survival;
                }
                (_, State::Start) => return Err(RuleSetError::MissingBirth),
                (n, _) => {
                    let n = n.to_digit(10).ok_or(RuleSetError::InvalidChar(n))?;

                    if n > 8 {
                        return Err(RuleSetError::OutOfRange(n));
                    }

                    match state {
                        State::Survival => s_bits |= 1 << n,
                        _ => b |= 1 << n,
                    }
                }
            }
        }

        Ok(RuleSet::new(b, s_bits))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |bits: u16| -> String {
            (0..=8u16)
                .filter(|n| bits & (1 << n) != 0)
                .map(|n| char::from(b'0' + n as u8))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}
