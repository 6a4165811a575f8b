use std::str::FromStr;

use garde::Validate;
use regex::Regex;
use serde::{de::Visitor, Deserialize};

use crate::Error;

/// Candlestick bar width, as accepted by the `interval` parameter of the klines endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub enum KlineInterval {
    Second(#[garde(range(min = 1, max = 1))] u32),
    Minute(#[garde(custom(minutes))] u32),
    Hour(#[garde(custom(hours))] u32),
    Day(#[garde(custom(days))] u32),
    Week(#[garde(range(min = 1, max = 1))] u32),
    Month(#[garde(range(min = 1, max = 1))] u32),
}

fn one_of(value: &u32, allowed: &[u32]) -> garde::Result {
    if allowed.contains(value) {
        return Ok(());
    }
    return Err(garde::Error::new("not a supported interval width"));
}

fn minutes(value: &u32, _: &()) -> garde::Result {
    return one_of(value, &[1, 3, 5, 15, 30]);
}

fn hours(value: &u32, _: &()) -> garde::Result {
    return one_of(value, &[1, 2, 4, 6, 8, 12]);
}

fn days(value: &u32, _: &()) -> garde::Result {
    return one_of(value, &[1, 3]);
}

impl std::fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return match self {
            KlineInterval::Second(x) => write!(f, "{x}s"),
            KlineInterval::Minute(x) => write!(f, "{x}m"),
            KlineInterval::Hour(x) => write!(f, "{x}h"),
            KlineInterval::Day(x) => write!(f, "{x}d"),
            KlineInterval::Week(x) => write!(f, "{x}w"),
            KlineInterval::Month(x) => write!(f, "{x}M"),
        };
    }
}

impl Default for KlineInterval {
    fn default() -> Self {
        return KlineInterval::Hour(1);
    }
}

impl FromStr for KlineInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let regex = Regex::new(r"^(\d+)([smhdwM])$")
            .map_err(|err| Error::IntervalError(err.to_string()))?;
        let captures = regex
            .captures(s)
            .ok_or_else(|| Error::IntervalError(format!("{s}: invalid format")))?;
        let value = captures[1]
            .parse::<u32>()
            .map_err(|err| Error::IntervalError(format!("{s}: {err}")))?;

        let interval = match &captures[2] {
            "s" => KlineInterval::Second(value),
            "m" => KlineInterval::Minute(value),
            "h" => KlineInterval::Hour(value),
            "d" => KlineInterval::Day(value),
            "w" => KlineInterval::Week(value),
            "M" => KlineInterval::Month(value),
            unit => return Err(Error::IntervalError(format!("{s}: invalid unit {unit}"))),
        };

        interval
            .validate(&())
            .map_err(|err| Error::IntervalError(format!("{s}: {err}")))?;
        return Ok(interval);
    }
}

struct KlineIntervalVisitor;

impl<'de> Visitor<'de> for KlineIntervalVisitor {
    type Value = KlineInterval;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        return formatter.write_str(
            "one of 1s, 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d, 3d, 1w or 1M",
        );
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        return v.parse::<KlineInterval>().map_err(E::custom);
    }
}

impl<'de> Deserialize<'de> for KlineInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        return deserializer.deserialize_str(KlineIntervalVisitor);
    }
}

#[cfg(test)]
mod tests {
    use crate::KlineInterval;

    #[test]
    fn parses_supported_intervals() {
        for (raw, expected) in [
            ("1s", KlineInterval::Second(1)),
            ("1m", KlineInterval::Minute(1)),
            ("15m", KlineInterval::Minute(15)),
            ("1h", KlineInterval::Hour(1)),
            ("12h", KlineInterval::Hour(12)),
            ("3d", KlineInterval::Day(3)),
            ("1w", KlineInterval::Week(1)),
            ("1M", KlineInterval::Month(1)),
        ] {
            let interval: KlineInterval = raw.parse().expect("supported interval should parse");
            assert_eq!(interval, expected);
            assert_eq!(interval.to_string(), raw);
        }
    }

    #[test]
    fn error_handling() {
        "0m".parse::<KlineInterval>()
            .expect_err("KlineInterval::Minute(0) should not be valid");
        "7m".parse::<KlineInterval>()
            .expect_err("KlineInterval::Minute(7) should not be valid");
        "3h".parse::<KlineInterval>()
            .expect_err("KlineInterval::Hour(3) should not be valid");
        "2w".parse::<KlineInterval>()
            .expect_err("KlineInterval::Week(2) should not be valid");
        "1y".parse::<KlineInterval>()
            .expect_err("unknown unit should not be valid");
        "h1".parse::<KlineInterval>()
            .expect_err("unit before width should not be valid");
    }

    #[test]
    fn deserializes_from_json_string() {
        let interval: KlineInterval = serde_json::from_str("\"4h\"").unwrap();
        assert_eq!(interval, KlineInterval::Hour(4));
        serde_json::from_str::<KlineInterval>("\"5h\"")
            .expect_err("KlineInterval::Hour(5) should not deserialize");
    }
}
