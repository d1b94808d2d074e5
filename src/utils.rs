use chrono::{DateTime as TzDateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de};

use crate::prelude::*;

pub fn format_money(amount: Decimal) -> String {
  format!("${:.2}", amount.round_dp(2))
}

/// Accepts `2024-04-01`, `2024-04-01T10:30:00[.fff]` or any RFC 3339
/// timestamp. Offsets are normalized to UTC.
pub fn parse_date(s: &str) -> Option<DateTime> {
  let s = s.trim();
  if let Ok(dt) = TzDateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc).naive_utc());
  }
  if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(dt);
  }
  if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
    return Some(dt);
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn deserialize_date<'de, D>(de: D) -> Result<DateTime, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(de)?;
  parse_date(&raw)
    .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
}

pub fn deserialize_opt_date<'de, D>(de: D) -> Result<Option<DateTime>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<String>::deserialize(de)? {
    Some(raw) => parse_date(&raw)
      .map(Some)
      .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`"))),
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_plain_date() {
    let dt = parse_date("2024-04-01").unwrap();
    assert_eq!(dt.to_string(), "2024-04-01 00:00:00");
  }

  #[test]
  fn test_parse_rfc3339_normalizes_offset() {
    let dt = parse_date("2024-04-01T02:00:00+02:00").unwrap();
    assert_eq!(dt.to_string(), "2024-04-01 00:00:00");
  }

  #[test]
  fn test_parse_naive_timestamp() {
    let dt = parse_date("2024-04-01T10:30:00.250").unwrap();
    assert_eq!(dt.format("%H:%M:%S").to_string(), "10:30:00");
  }

  #[test]
  fn test_parse_garbage() {
    assert!(parse_date("next tuesday").is_none());
    assert!(parse_date("").is_none());
  }

  #[test]
  fn test_format_money() {
    assert_eq!(format_money(Decimal::new(35050, 2)), "$350.50");
    assert_eq!(format_money(Decimal::ZERO), "$0.00");
    assert_eq!(format_money(Decimal::new(1, 3)), "$0.00");
  }
}
