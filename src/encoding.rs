use std::borrow::Cow;

// Polish diacritics whose UTF-8 bytes were decoded as cp1250 once too often.
// Two-character sequences first; the bare "Ä"/"Ĺ" fallbacks must stay last or
// they would eat the first half of the longer patterns.
static ENCODING_FIXES: &[(&str, &str)] = &[
  ("Ä…", "ą"),
  ("Ä„", "Ą"),
  ("Ä‡", "ć"),
  ("Ä†", "Ć"),
  ("Ä™", "ę"),
  ("Ä˜", "Ę"),
  ("Ĺ‚", "ł"),
  ("Ĺ„", "ń"),
  ("Ĺƒ", "Ń"),
  ("Ĺ›", "ś"),
  ("Ĺš", "Ś"),
  ("Ĺş", "ź"),
  ("Ĺą", "Ź"),
  ("ĹĽ", "ż"),
  ("Ĺ»", "Ż"),
  ("Ăł", "ó"),
  ("Ă“", "Ó"),
  ("Ä", "Ą"),
  ("Ĺ", "Ł"),
];

/// Every mojibake sequence we can repair starts with one of these.
fn looks_garbled(text: &str) -> bool {
  text.chars().any(|c| matches!(c, 'Ä' | 'Ĺ' | 'Ă'))
}

/// Repair double-encoded Polish text, best-effort.
///
/// Applies a fixed, ordered substitution table. Idempotent: repaired output
/// contains none of the trigger sequences, so a second pass is a no-op.
/// Unknown garbled sequences are left unchanged rather than guessed at.
pub fn repair(text: &str) -> Cow<'_, str> {
  if !looks_garbled(text) {
    return Cow::Borrowed(text);
  }

  let mut out = text.to_string();
  for (wrong, correct) in ENCODING_FIXES {
    if out.contains(wrong) {
      out = out.replace(wrong, correct);
    }
  }

  if out != text {
    log::debug!("encoding repair: {:?} -> {:?}", text, out);
    Cow::Owned(out)
  } else {
    Cow::Borrowed(text)
  }
}
