use romdb_catalog::*;
use romdb_db::*;

fn goemon() -> GameRecord {
    let mut record = GameRecord::new("8F1B2A5A-FC3E9E0E-C:45");
    record.good_name = Some("Mystical Ninja Starring Goemon (U)".to_string());
    record.product_id = Some("NUS-NMN-USA".to_string());
    record.developer = Some("Konami".to_string());
    record.genre = Some("Action".to_string());
    record.release = parse_release_date("1998-06-23");
    record.players = Some(1);
    record.force_feedback = Some(true);
    record
}

fn count(conn: &rusqlite::Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

#[test]
fn unknown_region_created_once() {
    let conn = open_memory().unwrap();

    let first = get_or_create_region(&conn, Some("99")).unwrap().unwrap();
    let second = get_or_create_region(&conn, Some("99")).unwrap().unwrap();
    assert_eq!(first, second);

    let name: String = conn
        .query_row("SELECT name FROM regions WHERE id = ?1", [first], |row| row.get(0))
        .unwrap();
    assert!(name.contains("99"));
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM regions WHERE code = '99'"), 1);
}

#[test]
fn seeded_region_is_reused() {
    let conn = open_memory().unwrap();
    let before = count(&conn, "SELECT COUNT(*) FROM regions");
    assert!(get_or_create_region(&conn, Some("4A")).unwrap().is_some());
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM regions"), before);
}

#[test]
fn empty_input_resolves_to_nothing() {
    let conn = open_memory().unwrap();
    assert_eq!(get_or_create_region(&conn, None).unwrap(), None);
    assert_eq!(get_or_create_region(&conn, Some("")).unwrap(), None);
    assert_eq!(get_or_create_developer(&conn, Some("  ")).unwrap(), None);
    assert_eq!(get_or_create_genre(&conn, None).unwrap(), None);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM developers"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM genres"), 0);
}

#[test]
fn developer_and_genre_get_or_create() {
    let conn = open_memory().unwrap();
    let konami = get_or_create_developer(&conn, Some("Konami")).unwrap();
    assert_eq!(get_or_create_developer(&conn, Some("Konami")).unwrap(), konami);
    assert_ne!(get_or_create_developer(&conn, Some("Nintendo")).unwrap(), konami);

    let action = get_or_create_genre(&conn, Some("Action")).unwrap();
    assert_eq!(get_or_create_genre(&conn, Some("Action")).unwrap(), action);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM genres"), 1);
}

#[test]
fn cartridge_colors_are_lookup_only() {
    let conn = open_memory().unwrap();
    assert!(find_cartridge_color(&conn, Some("Gold")).unwrap().is_some());
    assert_eq!(find_cartridge_color(&conn, Some("Purple")).unwrap(), None);
    assert_eq!(find_cartridge_color(&conn, None).unwrap(), None);
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM cartridge_colors"),
        CARTRIDGE_COLOR_SEEDS.len() as i64
    );
}

#[test]
fn set_cartridge_color() {
    let conn = open_memory().unwrap();
    let game = upsert_game(&conn, &goemon()).unwrap();

    assert!(set_game_cartridge_color(&conn, game.id, "Gold").unwrap());
    assert!(!set_game_cartridge_color(&conn, game.id, "Purple").unwrap());

    let row = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(row.cartridge_color.as_deref(), Some("Gold"));

    let err = set_game_cartridge_color(&conn, 9999, "Gold").unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}

#[test]
fn upsert_game_inserts_all_fields() {
    let conn = open_memory().unwrap();
    let result = upsert_game(&conn, &goemon()).unwrap();
    assert!(result.created);

    let row = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(row.id, result.id);
    assert_eq!(row.region_code.as_deref(), Some("45"));
    assert_eq!(row.region_name.as_deref(), Some("USA"));
    assert_eq!(row.cartridge_code.as_deref(), Some("NUS-NMN-USA"));
    assert_eq!(row.developer.as_deref(), Some("Konami"));
    assert_eq!(row.genre.as_deref(), Some("Action"));
    assert_eq!(row.release_date.as_deref(), Some("1998-06-23"));
    assert_eq!(row.release_year, Some(1998));
    assert_eq!(row.players, Some(1));
    assert_eq!(row.force_feedback, Some(true));
}

#[test]
fn cartridge_code_falls_back_to_decomposed() {
    let conn = open_memory().unwrap();
    upsert_game(&conn, &GameRecord::new("AAAA-BBBB-C:4A")).unwrap();
    let row = find_game_by_rom_id(&conn, "AAAA-BBBB-C:4A").unwrap().unwrap();
    assert_eq!(row.cartridge_code.as_deref(), Some("4A"));
    assert_eq!(row.region_name.as_deref(), Some("Japan"));
}

#[test]
fn later_product_id_replaces_decomposed_code() {
    let conn = open_memory().unwrap();
    upsert_game(&conn, &GameRecord::new("8F1B2A5A-FC3E9E0E-C:45")).unwrap();
    let row = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(row.cartridge_code.as_deref(), Some("45"));

    upsert_game(&conn, &goemon()).unwrap();
    let row = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(row.cartridge_code.as_deref(), Some("NUS-NMN-USA"));
}

#[test]
fn stored_product_id_is_not_replaced() {
    let conn = open_memory().unwrap();
    upsert_game(&conn, &goemon()).unwrap();

    let mut other = GameRecord::new("8F1B2A5A-FC3E9E0E-C:45");
    other.product_id = Some("NUS-NMN-USA-1".to_string());
    upsert_game(&conn, &other).unwrap();

    let row = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(row.cartridge_code.as_deref(), Some("NUS-NMN-USA"));
}

#[test]
fn upsert_game_fills_only_missing_fields() {
    let conn = open_memory().unwrap();

    let mut sparse = GameRecord::new("8F1B2A5A-FC3E9E0E-C:45");
    sparse.good_name = Some("Original Title".to_string());
    let first = upsert_game(&conn, &sparse).unwrap();

    let second = upsert_game(&conn, &goemon()).unwrap();
    assert!(!second.created);
    assert_eq!(second.id, first.id);

    let row = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(row.good_name.as_deref(), Some("Original Title"));
    assert_eq!(row.developer.as_deref(), Some("Konami"));
    assert_eq!(row.players, Some(1));
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM games"), 1);
}

#[test]
fn upsert_game_with_absent_fields_keeps_stored_values() {
    let conn = open_memory().unwrap();
    upsert_game(&conn, &goemon()).unwrap();
    upsert_game(&conn, &GameRecord::new("8F1B2A5A-FC3E9E0E-C:45")).unwrap();

    let row = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(row.good_name.as_deref(), Some("Mystical Ninja Starring Goemon (U)"));
    assert_eq!(row.force_feedback, Some(true));
}

#[test]
fn settings_are_routed_by_category() {
    let conn = open_memory().unwrap();
    let game = upsert_game(&conn, &goemon()).unwrap();

    upsert_setting(&conn, game.id, SettingCategory::Core, "Counter Factor", "2").unwrap();
    upsert_setting(&conn, game.id, SettingCategory::Video, "Resolution", "640x480").unwrap();
    upsert_setting(&conn, game.id, SettingCategory::Core, "Counter Factor", "1").unwrap();

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM core_settings"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM video_settings"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM audio_settings"), 0);
    assert_eq!(
        game_setting(&conn, game.id, SettingCategory::Core, "Counter Factor").unwrap().as_deref(),
        Some("1")
    );
}

#[test]
fn metadata_last_write_wins() {
    let conn = open_memory().unwrap();
    upsert_metadata(&conn, "Meta.Version", "1.0").unwrap();
    upsert_metadata(&conn, "Meta.Version", "2.0").unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM metadata"), 1);
    assert_eq!(database_version(&conn).unwrap().as_deref(), Some("2.0"));
}

#[test]
fn descriptions_unique_per_category_and_name() {
    let conn = open_memory().unwrap();
    let mut desc = SettingDescription {
        category: "Core".to_string(),
        setting_name: "Counter Factor".to_string(),
        description: "Old text".to_string(),
        possible_values: "- 1\n- 2 (default)".to_string(),
        default_value: Some("2".to_string()),
    };
    upsert_description(&conn, &desc).unwrap();

    desc.description = "New text".to_string();
    upsert_description(&conn, &desc).unwrap();

    desc.category = "Audio".to_string();
    upsert_description(&conn, &desc).unwrap();

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM setting_descriptions"), 2);
    let text: String = conn
        .query_row(
            "SELECT description FROM setting_descriptions WHERE category = 'Core'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(text, "New text");
}
