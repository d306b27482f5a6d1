use std::str::FromStr;

use crate::error::ParseError;
use crate::location::{Coord, Location};

/// Parse a decision service's reply into the location it chose.
///
/// The whole reply, ignoring surrounding whitespace, must be `x,y` or `(x,y)`; whitespace around either number is
/// allowed. Prose around the coordinates is rejected rather than scanned for something that looks like a pair.
pub fn parse_reply(reply: &str) -> Result<Location, ParseError> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let inner = match (trimmed.strip_prefix('('), trimmed.strip_suffix(')')) {
        (Some(_), Some(_)) if trimmed.len() >= 2 => &trimmed[1..trimmed.len() - 1],
        (None, None) => trimmed,
        // one paren without the other
        _ => return Err(ParseError::NotACoordinate(trimmed.to_string())),
    };

    let mut parts = inner.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), None) => Ok(Location(coordinate(x)?, coordinate(y)?)),
        _ => Err(ParseError::NotACoordinate(trimmed.to_string())),
    }
}

fn coordinate(text: &str) -> Result<Coord, ParseError> {
    let text = text.trim();
    // `usize::from_str` accepts a leading `+`
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ParseError::BadNumber(text.to_string()));
    }
    text.parse().map_err(|_| ParseError::BadNumber(text.to_string()))
}

impl FromStr for Location {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_reply(s)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::location::Location;
    use crate::reply::parse_reply;

    #[test]
    fn accepted_forms() {
        assert_eq!(parse_reply("1,2"), Ok(Location(1, 2)));
        assert_eq!(parse_reply("  (3, 0)\n"), Ok(Location(3, 0)));
        assert_eq!("( 4 ,5 )".parse::<Location>(), Ok(Location(4, 5)));
    }

    #[test]
    fn empty() {
        assert_eq!(parse_reply(" \n"), Err(ParseError::Empty));
    }

    #[test]
    fn prose_is_rejected() {
        assert_eq!(
            parse_reply("I would move (1,2)"),
            Err(ParseError::NotACoordinate("I would move (1,2)".to_string()))
        );
        assert_eq!(parse_reply("(1,2"), Err(ParseError::NotACoordinate("(1,2".to_string())));
        assert_eq!(parse_reply("1,2,3"), Err(ParseError::NotACoordinate("1,2,3".to_string())));
        assert_eq!(parse_reply("12"), Err(ParseError::NotACoordinate("12".to_string())));
    }

    #[test]
    fn bad_numbers() {
        assert_eq!(parse_reply("-1,2"), Err(ParseError::BadNumber("-1".to_string())));
        assert_eq!(parse_reply("+1,2"), Err(ParseError::BadNumber("+1".to_string())));
        assert_eq!(parse_reply("a,2"), Err(ParseError::BadNumber("a".to_string())));
        assert_eq!(parse_reply("1,"), Err(ParseError::BadNumber("".to_string())));
    }
}
