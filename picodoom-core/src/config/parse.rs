//! Minimal TOML reader for the board config
//!
//! Handles only what `board.toml` needs:
//! - `[section]` headers
//! - `key = value` with integer (decimal or `0x` hex, `_` separators) and
//!   boolean values
//! - `#` comments, whole-line or trailing
//!
//! Keys missing from the file keep their defaults.

use super::types::BoardConfig;

/// Parse error, with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Section header is not one of the known sections
    UnknownSection(usize),
    /// Key is not valid in its section
    UnknownKey(usize),
    /// Line is neither a header nor `key = value`
    Malformed(usize),
    /// Value does not fit the key's type
    InvalidValue(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Input,
    Wad,
    Status,
}

/// Parse a board config file
pub fn parse_config(input: &str) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ConfigError::UnknownSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::Malformed(line_no))?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "display" => Some(Section::Display),
        "input" => Some(Section::Input),
        "wad" => Some(Section::Wad),
        "status" => Some(Section::Status),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: TryFrom<u64>>(value: &str, line_no: usize) -> Result<T, ConfigError> {
    let invalid = ConfigError::InvalidValue(line_no);
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    // Underscores are separators only, never leading, trailing or doubled
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(invalid);
    }

    let mut result: u64 = 0;
    for c in digits.chars().filter(|c| *c != '_') {
        let digit = c.to_digit(radix).ok_or(invalid)?;
        result = result
            .checked_mul(radix as u64)
            .and_then(|r| r.checked_add(digit as u64))
            .ok_or(invalid)?;
    }

    T::try_from(result).map_err(|_| invalid)
}

fn parse_bool(value: &str, line_no: usize) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue(line_no)),
    }
}

fn apply_value(
    config: &mut BoardConfig,
    section: Section,
    key: &str,
    value: &str,
    line_no: usize,
) -> Result<(), ConfigError> {
    match section {
        Section::Display => {
            let display = &mut config.display;
            match key {
                "panel_width" => display.panel_width = parse_int(value, line_no)?,
                "panel_height" => display.panel_height = parse_int(value, line_no)?,
                "spi_frequency_hz" => display.spi_frequency_hz = parse_int(value, line_no)?,
                "madctl" => display.madctl = parse_int(value, line_no)?,
                "invert" => display.invert = parse_bool(value, line_no)?,
                "backlight" => display.backlight = parse_int(value, line_no)?,
                "border_color" => {
                    let color: u32 = parse_int(value, line_no)?;
                    if color > 0xFF_FFFF {
                        return Err(ConfigError::InvalidValue(line_no));
                    }
                    display.border_color = color;
                }
                _ => return Err(ConfigError::UnknownKey(line_no)),
            }
        }
        Section::Input => match key {
            "debounce_ms" => config.input.debounce_ms = parse_int(value, line_no)?,
            "hold_ms" => config.input.hold_ms = parse_int(value, line_no)?,
            _ => return Err(ConfigError::UnknownKey(line_no)),
        },
        Section::Wad => match key {
            "flash_offset" => config.wad.flash_offset = parse_int(value, line_no)?,
            "max_len" => config.wad.max_len = parse_int(value, line_no)?,
            _ => return Err(ConfigError::UnknownKey(line_no)),
        },
        Section::Status => match key {
            "interval_ms" => config.status.interval_ms = parse_int(value, line_no)?,
            _ => return Err(ConfigError::UnknownKey(line_no)),
        },
        Section::Root => return Err(ConfigError::UnknownKey(line_no)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = r#"
# Pico Display 2.0
[display]
panel_width = 320
panel_height = 240
spi_frequency_hz = 62_500_000
madctl = 0x60
invert = true
backlight = 200        # dimmed
border_color = 0x102030

[input]
debounce_ms = 40
hold_ms = 450

[wad]
flash_offset = 0x0010_0000
max_len = 1048576

[status]
interval_ms = 2000
"#;

    #[test]
    fn test_parse_board_file() {
        let config = parse_config(BOARD).unwrap();
        assert_eq!(config.display.spi_frequency_hz, 62_500_000);
        assert_eq!(config.display.madctl, 0x60);
        assert!(config.display.invert);
        assert_eq!(config.display.backlight, 200);
        assert_eq!(config.display.border_color, 0x102030);
        assert_eq!(config.input.debounce_ms, 40);
        assert_eq!(config.input.hold_ms, 450);
        assert_eq!(config.wad.flash_offset, 0x0010_0000);
        assert_eq!(config.wad.max_len, 1_048_576);
        assert_eq!(config.status.interval_ms, 2000);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[input]\nhold_ms = 700\n").unwrap();
        assert_eq!(config.input.hold_ms, 700);
        assert_eq!(config.input.debounce_ms, 50);
        assert_eq!(config.display, BoardConfig::default().display);

        assert_eq!(parse_config("").unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_malformed_lines_rejected() {
        assert_eq!(
            parse_config("[display]\npanel_width 320\n"),
            Err(ConfigError::Malformed(2))
        );
        assert_eq!(
            parse_config("[display]\npanel_width =\n"),
            Err(ConfigError::Malformed(2))
        );
        assert_eq!(parse_config("[sound]\n"), Err(ConfigError::UnknownSection(1)));
        assert_eq!(
            parse_config("[display]\nrotation = 1\n"),
            Err(ConfigError::UnknownKey(2))
        );
        assert_eq!(parse_config("hold_ms = 1\n"), Err(ConfigError::UnknownKey(1)));
    }

    #[test]
    fn test_value_ranges() {
        assert_eq!(
            parse_config("[display]\nmadctl = 256\n"),
            Err(ConfigError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[display]\ninvert = yes\n"),
            Err(ConfigError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[display]\nborder_color = 0x1000000\n"),
            Err(ConfigError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[input]\nhold_ms = -5\n"),
            Err(ConfigError::InvalidValue(2))
        );
    }

    #[test]
    fn test_parse_int_forms() {
        assert_eq!(parse_int::<u32>("0xFF", 1), Ok(255));
        assert_eq!(parse_int::<u32>("1_000", 1), Ok(1000));
        assert_eq!(parse_int::<u32>("_1", 1), Err(ConfigError::InvalidValue(1)));
        assert_eq!(parse_int::<u32>("1__0", 1), Err(ConfigError::InvalidValue(1)));
        assert_eq!(parse_int::<u32>("0x", 1), Err(ConfigError::InvalidValue(1)));
        assert_eq!(
            parse_int::<u64>("99999999999999999999999", 1),
            Err(ConfigError::InvalidValue(1))
        );
    }

    #[test]
    fn test_shipped_board_file_parses() {
        let config = parse_config(include_str!("../../../picodoom-firmware/board.toml")).unwrap();
        assert_eq!(config.display.panel_width, 320);
        assert_eq!(config.display.panel_height, 240);
    }
}
