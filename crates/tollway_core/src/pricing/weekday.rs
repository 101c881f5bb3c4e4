use jiff::civil::Weekday;

use crate::error::ValidationError;

pub const WEEK: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

/// Parses a full English day name or its three-letter abbreviation, ignoring case.
pub fn parse_weekday(input: &str) -> Result<Weekday, ValidationError> {
    let trimmed = input.trim();

    WEEK.into_iter()
        .find(|&weekday| {
            let name = weekday_name(weekday);
            trimmed.eq_ignore_ascii_case(name) || trimmed.eq_ignore_ascii_case(&name[..3])
        })
        .ok_or_else(|| ValidationError::UnknownDay(input.to_string()))
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Saturday | Weekday::Sunday)
}

/// `#[serde(with = "...")]` helpers storing a weekday as its English name.
pub mod serde_weekday {
    use jiff::civil::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::{parse_weekday, weekday_name};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(weekday_name(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        parse_weekday(&name).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Monday"), Ok(Weekday::Monday));
        assert_eq!(parse_weekday("saturday"), Ok(Weekday::Saturday));
        assert_eq!(parse_weekday(" SUN "), Ok(Weekday::Sunday));
        assert_eq!(parse_weekday("wed"), Ok(Weekday::Wednesday));
    }

    #[test]
    fn test_parse_unknown_weekday() {
        assert_eq!(
            parse_weekday("Caturday"),
            Err(ValidationError::UnknownDay(String::from("Caturday")))
        );
        assert!(parse_weekday("").is_err());
    }

    #[test]
    fn test_is_weekend() {
        let weekend = WEEK
            .into_iter()
            .filter(|&weekday| is_weekend(weekday))
            .collect::<Vec<_>>();

        assert_eq!(weekend, vec![Weekday::Saturday, Weekday::Sunday]);
    }
}
