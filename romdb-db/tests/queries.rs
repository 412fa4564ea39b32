use romdb_catalog::*;
use romdb_db::*;

fn seed(conn: &rusqlite::Connection) {
    let mut goemon = GameRecord::new("8F1B2A5A-FC3E9E0E-C:45");
    goemon.good_name = Some("Mystical Ninja Starring Goemon (U)".to_string());
    goemon.product_id = Some("NUS-NMN-USA".to_string());
    goemon.players = Some(1);
    goemon.force_feedback = Some(true);
    upsert_game(conn, &goemon).unwrap();

    let mut bracketed = GameRecord::new("[0A1B2C3D-4E5F6071]");
    bracketed.good_name = Some("Bracketed Entry".to_string());
    bracketed.force_feedback = Some(false);
    upsert_game(conn, &bracketed).unwrap();
}

#[test]
fn lookup_by_rom_id() {
    let conn = open_memory().unwrap();
    seed(&conn);

    let game = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap();
    assert_eq!(
        game.unwrap().good_name.as_deref(),
        Some("Mystical Ninja Starring Goemon (U)")
    );
    assert!(find_game_by_rom_id(&conn, "nope").unwrap().is_none());
}

#[test]
fn lookup_by_crc_pair() {
    let conn = open_memory().unwrap();
    seed(&conn);

    // Header country letter 'E' is code 45
    let game = find_game_by_crc(&conn, 0x8F1B2A5A, 0xFC3E9E0E, "E").unwrap().unwrap();
    assert_eq!(game.rom_id, "8F1B2A5A-FC3E9E0E-C:45");

    // Stored under a different country code
    let game = find_game_by_crc(&conn, 0x8F1B2A5A, 0xFC3E9E0E, "4A").unwrap().unwrap();
    assert_eq!(game.rom_id, "8F1B2A5A-FC3E9E0E-C:45");

    // Stored bracketed without a country
    let game = find_game_by_crc(&conn, 0x0A1B2C3D, 0x4E5F6071, "45").unwrap().unwrap();
    assert_eq!(game.good_name.as_deref(), Some("Bracketed Entry"));

    assert!(find_game_by_crc(&conn, 1, 2, "45").unwrap().is_none());
}

#[test]
fn missing_setting_is_none() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let game = find_game_by_rom_id(&conn, "8F1B2A5A-FC3E9E0E-C:45").unwrap().unwrap();
    assert_eq!(
        game_setting(&conn, game.id, SettingCategory::Audio, "Fix Audio").unwrap(),
        None
    );
}

#[test]
fn version_absent_without_metadata() {
    let conn = open_memory().unwrap();
    assert_eq!(database_version(&conn).unwrap(), None);

    upsert_metadata(&conn, "version", "legacy").unwrap();
    assert_eq!(database_version(&conn).unwrap().as_deref(), Some("legacy"));

    upsert_metadata(&conn, "Meta.Version", "2.0").unwrap();
    assert_eq!(database_version(&conn).unwrap().as_deref(), Some("2.0"));
}

#[test]
fn regions_listed_by_code() {
    let conn = open_memory().unwrap();
    let regions = list_regions(&conn).unwrap();
    assert_eq!(regions.len(), 15);
    assert_eq!(regions[0].code, "20");
    assert_eq!(regions[0].name, "Development");
}

#[test]
fn stats_counts() {
    let conn = open_memory().unwrap();
    seed(&conn);
    upsert_metadata(&conn, "Meta.Version", "2.0").unwrap();

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.games, 2);
    assert_eq!(stats.with_cartridge_code, 1);
    assert_eq!(stats.with_players, 1);
    assert_eq!(stats.with_rumble, 1);
    assert_eq!(stats.regions, 15);
    assert_eq!(stats.metadata_entries, 1);
}
