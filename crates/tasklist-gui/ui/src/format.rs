use chrono::NaiveDate;

/// Text shown under a card title. Dates in `YYYY-MM-DD` form read as
/// `Due Oct 14, 2026`; anything else is shown as typed.
pub fn format_due(
  raw: Option<&str>
) -> String {
  let Some(raw) = raw
    .map(str::trim)
    .filter(|value| !value.is_empty())
  else {
    return String::new();
  };

  match NaiveDate::parse_from_str(
    raw, "%Y-%m-%d"
  ) {
    | Ok(date) => {
      format!(
        "Due {}",
        date.format("%b %-d, %Y")
      )
    }
    | Err(_) => raw.to_string()
  }
}
