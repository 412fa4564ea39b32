use super::*;

const INFO: &str = "\
Settings documentation

**** Core ****
Counter Factor
--------------
- 1
- 2 (default)
- 3
How many cycles each instruction takes.
Lower is faster.

Save Type
---------
- Eeprom 4KB (default)
- Sram
Cartridge save chip.
**** Audio ****
Fix Audio
---------
- Yes (default)
- No
Corrects audio timing.
";

#[test]
fn parses_settings_per_category() {
    let descriptions = parse_setting_descriptions(INFO);
    assert_eq!(descriptions.len(), 3);

    let counter = &descriptions[0];
    assert_eq!(counter.category, "Core");
    assert_eq!(counter.setting_name, "Counter Factor");
    assert_eq!(counter.possible_values, "- 1\n- 2 (default)\n- 3");
    assert_eq!(counter.default_value.as_deref(), Some("2"));
    assert_eq!(
        counter.description,
        "How many cycles each instruction takes.\nLower is faster."
    );

    let save = &descriptions[1];
    assert_eq!(save.setting_name, "Save Type");
    assert_eq!(save.default_value.as_deref(), Some("Eeprom 4KB"));
    assert_eq!(save.description, "Cartridge save chip.");

    let audio = &descriptions[2];
    assert_eq!(audio.category, "Audio");
    assert_eq!(audio.setting_name, "Fix Audio");
    assert_eq!(audio.default_value.as_deref(), Some("Yes"));
}

#[test]
fn settings_without_category_are_ignored() {
    let text = "Orphan\n------\n- A\nText\n**** Video ****\nRes\n---\nDescribed.\n";
    let descriptions = parse_setting_descriptions(text);
    assert_eq!(descriptions.len(), 1);
    assert_eq!(descriptions[0].category, "Video");
    assert_eq!(descriptions[0].possible_values, "");
    assert_eq!(descriptions[0].default_value, None);
    assert_eq!(descriptions[0].description, "Described.");
}

#[test]
fn empty_text() {
    assert!(parse_setting_descriptions("").is_empty());
    assert!(parse_setting_descriptions("**** Core ****\n").is_empty());
}

#[test]
fn crlf_input() {
    let descriptions = parse_setting_descriptions(&INFO.replace('\n', "\r\n"));
    assert_eq!(descriptions.len(), 3);
    assert_eq!(descriptions[0].default_value.as_deref(), Some("2"));
}
