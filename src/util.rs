//! Small utility helpers used across modules.

/// Escape text for insertion into HTML element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Russian plural form for a count: (one, few, many), e.g.
/// ("секунду", "секунды", "секунд").
pub fn plural_ru<'a>(n: u32, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
  let n100 = n % 100;
  let n10 = n % 10;
  if (11..=14).contains(&n100) {
    many
  } else if n10 == 1 {
    one
  } else if (2..=4).contains(&n10) {
    few
  } else {
    many
  }
}
