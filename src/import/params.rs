//! Parameter parsing for CSI sequences.
//!
//! Everything between `ESC [` and the final letter is a list of decimal
//! numbers separated by semicolons. ANSI art in the wild is sloppy, so
//! parsing is lenient:
//! - a segment is read from its leading digits; no digits means 0
//! - an empty trailing segment is dropped (`"1;"` is `[1]`)
//! - values saturate at `u32::MAX`
//! - only the first [`MAX_PARAMS`] values are kept

use std::fmt;

use tracing::debug;

pub const MAX_PARAMS: usize = 32;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<u32>,
    /// Values seen past `MAX_PARAMS`
    dropped: usize,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: u32) {
        if self.values.len() < MAX_PARAMS {
            self.values.push(value);
        } else {
            self.dropped += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    pub fn get_or(&self, index: usize, default: u32) -> u32 {
        self.get(index).unwrap_or(default)
    }

    /// Number of values discarded because the tuple was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

/// Whether `byte` ends a parameter run
pub fn is_final(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// Parse the parameter run at the start of `bytes`.
///
/// Returns the parameters and the number of bytes consumed, which is the
/// offset of the final letter, or `bytes.len()` if there is none.
pub fn parse_tuple(bytes: &[u8]) -> (Params, usize) {
    let consumed = bytes
        .iter()
        .position(|&b| is_final(b))
        .unwrap_or(bytes.len());

    let mut params = Params::new();
    let run = &bytes[..consumed];
    let mut segments = run.split(|&b| b == b';').peekable();
    while let Some(segment) = segments.next() {
        if segment.is_empty() && segments.peek().is_none() {
            break;
        }
        params.push(leading_number(segment));
    }

    if params.dropped() > 0 {
        debug!(
            "CSI tuple truncated: kept {}, dropped {}",
            params.len(),
            params.dropped()
        );
    }

    (params, consumed)
}

/// Decimal value of the leading digits, saturating
fn leading_number(segment: &[u8]) -> u32 {
    segment
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, &b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn values(input: &[u8]) -> Vec<u32> {
        parse_tuple(input).0.as_slice().to_vec()
    }

    #[test]
    fn test_params_basic() {
        let (params, consumed) = parse_tuple(b"1;22;333m rest");
        assert_eq!(consumed, 8);
        assert_eq!(params.len(), 3);
        assert_eq!(params.get(0), Some(1));
        assert_eq!(params.get(1), Some(22));
        assert_eq!(params.get(2), Some(333));
        assert_eq!(params.get(3), None);
    }

    #[test]
    fn test_empty_tuple_is_distinct_from_zero() {
        let (params, consumed) = parse_tuple(b"m");
        assert_eq!(consumed, 0);
        assert!(params.is_empty());

        assert_eq!(values(b"0m"), vec![0]);
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(values(b";m"), vec![0]);
        assert_eq!(values(b";5m"), vec![0, 5]);
        assert_eq!(values(b"1;m"), vec![1]);
        assert_eq!(values(b"1;;3m"), vec![1, 0, 3]);
    }

    #[test]
    fn test_non_digit_segments() {
        assert_eq!(values(b"?25h"), vec![0]);
        assert_eq!(values(b"12?;4H"), vec![12, 4]);
    }

    #[test]
    fn test_saturation() {
        assert_eq!(values(b"99999999999999999999m"), vec![u32::MAX]);
    }

    #[test]
    fn test_missing_final_consumes_everything() {
        let (params, consumed) = parse_tuple(b"1;2;3");
        assert_eq!(consumed, 5);
        assert_eq!(params.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_params_defaults() {
        let params = Params::new();
        assert_eq!(params.get_or(0, 1), 1);
    }

    #[test]
    fn test_tuple_is_bounded() {
        let input = format!("{}m", "7;".repeat(1000));
        let (params, consumed) = parse_tuple(input.as_bytes());
        assert_eq!(consumed, 2000);
        assert_eq!(params.len(), MAX_PARAMS);
        assert_eq!(params.dropped(), 1000 - MAX_PARAMS);
        assert!(params.iter().all(|v| v == 7));
    }

    #[test]
    fn test_params_debug() {
        assert_eq!(format!("{:?}", parse_tuple(b"1;2H").0), "[1, 2]");
    }

    proptest! {
        #[test]
        fn prop_tuple_never_exceeds_bound(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            let (params, consumed) = parse_tuple(&input);
            prop_assert!(params.len() <= MAX_PARAMS);
            prop_assert!(consumed <= input.len());
            if consumed < input.len() {
                prop_assert!(is_final(input[consumed]));
            }
        }
    }
}
