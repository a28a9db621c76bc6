//! Line parser for character database text
//!
//! Each line that starts with `Character` (after trimming) is matched against
//!
//! ```text
//! Character "<name>": Damage: <d>, Defense: <df>, Energy Rate: <er>, Move Speed: <ms>, Beast: <bool>
//! ```
//!
//! The quotes around the name and the comma after the energy rate are
//! optional. Numbers use a comma as the decimal separator. Anything that
//! fails to match is skipped without error.

use crate::record::RawRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const CANDIDATE_PREFIX: &str = "Character";

static RECORD_LINE: Lazy<Regex> = Lazy::new(|| {
    let num = r"\d+(?:,\d+)*";
    let pattern = format!(
        concat!(
            r#"^Character(?:\s+"?|\s*")(?P<name>[^"]+?)"?\s*:\s*"#,
            r"Damage:\s*(?P<damage>{num})\s*,\s*",
            r"Defense:\s*(?P<defense>{num})\s*,\s*",
            r"Energy Rate:\s*(?P<energy_rate>{num})\s*,?\s*",
            r"Move Speed:\s*(?P<move_speed>{num})\s*,\s*",
            r"Beast:\s*(?P<beast>\w+)",
        ),
        num = num
    );
    Regex::new(&pattern).expect("record line pattern is valid")
});

/// Parse database text into raw records, in source line order
pub fn parse_str(content: &str) -> Vec<RawRecord> {
    let mut candidates = 0usize;
    let mut records = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with(CANDIDATE_PREFIX) {
            continue;
        }
        candidates += 1;

        if let Some(record) = parse_line(line) {
            records.push(record);
        }
    }

    debug!(
        candidates,
        parsed = records.len(),
        skipped = candidates - records.len(),
        "parsed character text"
    );

    records
}

/// Parse a single line, returning `None` if it does not match the grammar
pub fn parse_line(line: &str) -> Option<RawRecord> {
    let caps = RECORD_LINE.captures(line.trim())?;

    let name = caps["name"].trim();
    if name.is_empty() {
        return None;
    }

    Some(RawRecord {
        name: name.to_string(),
        damage: parse_number(&caps["damage"])?,
        defense: parse_number(&caps["defense"])?,
        energy_rate: parse_number(&caps["energy_rate"])?,
        move_speed: parse_number(&caps["move_speed"])?,
        beast: &caps["beast"] == "True",
    })
}

/// Parse a comma-decimal number: the first comma becomes the decimal point
///
/// `"1,234"` is `1.234` and `"500"` is `500`. Anything from a second comma
/// on is ignored, so `"1,234,567"` is `1.234`.
pub fn parse_number(text: &str) -> Option<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    let leading = normalized.split(',').next()?;
    let value: f64 = leading.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WOLF: &str = r#"Character "Wolf": Damage: 10, Defense: 5, Energy Rate: 3, Move Speed: 7, Beast: True"#;

    #[test]
    fn test_parse_simple_line() {
        let record = parse_line(WOLF).unwrap();

        assert_eq!(record.name, "Wolf");
        assert_eq!(record.damage, 10.0);
        assert_eq!(record.defense, 5.0);
        assert_eq!(record.energy_rate, 3.0);
        assert_eq!(record.move_speed, 7.0);
        assert!(record.beast);
    }

    #[test]
    fn test_parse_comma_decimal() {
        let line = r#"Character "Owl": Damage: 1,234, Defense: 500, Energy Rate: 0,5 Move Speed: 12,75, Beast: False"#;
        let record = parse_line(line).unwrap();

        assert_eq!(record.damage, 1.234);
        assert_eq!(record.defense, 500.0);
        assert_eq!(record.energy_rate, 0.5);
        assert_eq!(record.move_speed, 12.75);
        assert!(!record.beast);
    }

    #[test]
    fn test_parse_without_energy_rate_comma() {
        let line = r#"Character "Owl": Damage: 1, Defense: 2, Energy Rate: 3 Move Speed: 4, Beast: True"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.energy_rate, 3.0);
        assert_eq!(record.move_speed, 4.0);
    }

    #[test]
    fn test_parse_thousands_grouped_field() {
        let line = r#"Character "Ogre": Damage: 1,234,567, Defense: 5, Energy Rate: 3, Move Speed: 7, Beast: True"#;
        let record = parse_line(line).unwrap();

        assert_eq!(record.damage, 1.234);
        assert_eq!(record.defense, 5.0);
        assert_eq!(parse_str(line).len(), 1);
    }

    #[test]
    fn test_quoted_name_is_trimmed() {
        let line = r#"Character "  Wolf ": Damage: 1, Defense: 2, Energy Rate: 3, Move Speed: 4, Beast: True"#;
        assert_eq!(parse_line(line).unwrap().name, "Wolf");

        // Trimmed names land in the same form group
        let text = format!("{}\n{}\n", line, WOLF);
        let records = crate::forms::derive_forms(parse_str(&text));
        assert_eq!(records[0].display_name, "Wolf (Form 1)");
        assert_eq!(records[1].display_name, "Wolf (Form 2)");
    }

    #[test]
    fn test_beast_token_with_trailing_punctuation() {
        for suffix in [".", ",", ";", " (boss)"] {
            let line = format!("{}{}", WOLF, suffix);
            assert!(parse_line(&line).unwrap().beast, "suffix {:?}", suffix);
        }

        let line = WOLF.replace("Beast: True", "Beast: False.");
        assert!(!parse_line(&line).unwrap().beast);
    }

    #[test]
    fn test_parse_unquoted_name() {
        let line = "Character Sand Crab: Damage: 1, Defense: 2, Energy Rate: 3, Move Speed: 4, Beast: True";
        let record = parse_line(line).unwrap();
        assert_eq!(record.name, "Sand Crab");
    }

    #[test]
    fn test_beast_only_exact_true() {
        for token in ["true", "TRUE", "Yes", "False", "1"] {
            let line = WOLF.replace("Beast: True", &format!("Beast: {}", token));
            assert!(!parse_line(&line).unwrap().beast, "token {}", token);
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,234"), Some(1.234));
        assert_eq!(parse_number("500"), Some(500.0));
        assert_eq!(parse_number("0,05"), Some(0.05));
        assert_eq!(parse_number("1,234,5"), Some(1.234));
        assert_eq!(parse_number("1,234,567"), Some(1.234));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_malformed_lines_are_dropped() {
        assert!(parse_line("garbage line").is_none());
        assert!(parse_line("Character \"Wolf\": Damage: ten, Defense: 5, Energy Rate: 3, Move Speed: 7, Beast: True").is_none());
        assert!(parse_line("Character \"Wolf\": Damage: 10, Defense: 5, Move Speed: 7, Beast: True").is_none());
        assert!(parse_line("Character \"Wolf\": Damage: -10, Defense: 5, Energy Rate: 3, Move Speed: 7, Beast: True").is_none());
        assert!(parse_line("Character \"\": Damage: 1, Defense: 5, Energy Rate: 3, Move Speed: 7, Beast: True").is_none());
    }

    #[test]
    fn test_parse_str_keeps_line_order() {
        let text = format!(
            "# header\n\n  {}\ngarbage line\nCharacter \"Cat\": Damage: 8, Defense: 8, Energy Rate: 8, Move Speed: 8, Beast: False\n",
            WOLF
        );
        let records = parse_str(&text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Wolf");
        assert_eq!(records[1].name, "Cat");
    }

    #[test]
    fn test_parse_str_empty() {
        assert!(parse_str("").is_empty());
        assert!(parse_str("nothing here\n\n").is_empty());
    }

    #[test]
    fn test_parse_str_handles_crlf() {
        let text = format!("{}\r\n{}\r\n", WOLF, WOLF);
        assert_eq!(parse_str(&text).len(), 2);
    }
}
