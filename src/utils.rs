use crate::error::{Error, Result};

/// Parse an inclusive seed range.
///
/// Range is specified as `start-end`, with `start <= end`.
/// A single number is a range of one seed.
///
pub fn parse_range(x: &str) -> Result<(u64, u64)> {
    let invalid = || Error::InvalidRange(String::from(x));
    let x = x.trim();
    match x.find('-') {
        Some(i) => {
            let start: u64 = x[..i].trim().parse().map_err(|_| invalid())?;
            let end: u64 = x[i+1..].trim().parse().map_err(|_| invalid())?;
            if start <= end {
                Ok((start, end))
            } else {
                Err(invalid())
            }
        },
        None => {
            let seed = x.parse().map_err(|_| invalid())?;
            Ok((seed, seed))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("0-100000").unwrap(), (0, 100000));
        assert_eq!(parse_range(" 5 - 7 ").unwrap(), (5, 7));
        assert_eq!(parse_range("42").unwrap(), (42, 42));
    }

    #[test]
    fn test_invalid_range() {
        for x in ["10-2", "a-b", "1-", "-1", "", "1-2-3"].iter() {
            match parse_range(x) {
                Err(Error::InvalidRange(s)) => assert_eq!(&s, x),
                r => panic!("unexpected result for {:?}: {:?}", x, r),
            }
        }
    }
}
