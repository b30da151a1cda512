use mapinfo_data::{Lump, MapInfoError, Registry, StringMap, load_order};
use mapinfo_types::{Argb, LevelFlags};
use std::path::Path;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");

fn read_lump(file: &str, name: &str) -> Lump {
    let path = Path::new(DATA_DIR).join(file);
    let data = std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("read {}", path.display()));
    Lump::new(name, data)
}

fn strings() -> StringMap {
    [
        ("HUSTR_1", "level 1: entryway"),
        ("HUSTR_2", "level 2: underhalls"),
        ("HUSTR_7", "level 7: dead simple"),
        ("HU1", "level 3: the gantlet"),
        ("MUSIC_RUNNIN", "runnin"),
        ("MUSIC_STALKS", "stalks"),
        ("MUSIC_SHAWN", "shawn"),
        ("MUSIC_READ_M", "read_m"),
        ("BGFLAT06", "SLIME16"),
        ("C1TEXT", "YOU HAVE ENTERED DEEPLY INTO THE INFESTED STARPORT."),
    ]
    .into_iter()
    .collect()
}

fn parse(input: &str) -> Result<Registry, MapInfoError> {
    let mut registry = Registry::new();
    registry.parse_lump(input, "MAPINFO", &strings())?;
    Ok(registry)
}

#[test]
fn modern_entryway() {
    let reg = parse(r#"map MAP01 "Entryway" { levelnum = 1 cluster = 1 }"#).expect("parse");
    assert_eq!(reg.levels().len(), 1);
    let level = &reg.levels()[0];
    assert_eq!(level.map_name.as_str(), "MAP01");
    assert_eq!(level.level_name.as_deref(), Some("Entryway"));
    assert_eq!(level.level_num, 1);
    assert_eq!(level.cluster, 1);
}

#[test]
fn legacy_numbered_map_with_lookup_title() {
    let reg = parse("map 3 lookup HU1 sky1 SKY3 0").expect("parse");
    let level = reg.find_level_info("MAP03").expect("MAP03");
    assert_eq!(level.level_num, 3);
    assert_eq!(level.level_name.as_deref(), Some("level 3: the gantlet"));
    assert_eq!(level.sky1.as_str(), "SKY3");
}

#[test]
fn numeric_short_names_are_padded() {
    let reg = parse("map 5 \"Five\"\nmap 12 \"Twelve\"").expect("parse");
    assert!(reg.find_level_info("MAP05").is_ok());
    assert_eq!(reg.find_level_by_num(12).expect("12").map_name.as_str(), "MAP12");
}

#[test]
fn unknown_modern_field_is_skipped() {
    let reg = parse(r#"map MAP01 "A" { par = 15 weirdfield = 5, 6 levelnum = 4 }"#).expect("parse");
    let level = reg.find_level_info("MAP01").expect("MAP01");
    assert_eq!(level.par_time, 15);
    assert_eq!(level.level_num, 4);
}

#[test]
fn unknown_modern_comma_list_stops_at_next_keyword() {
    let reg = parse(r#"map MAP01 "A" { foo = 1, 2, 3 par = 7 }"#).expect("parse");
    assert_eq!(reg.find_level_info("MAP01").expect("MAP01").par_time, 7);
}

#[test]
fn legacy_unknown_field_aborts_load() {
    let lump = read_lump("broken_legacy.txt", "BROKEN");
    let mut reg = Registry::new();
    let err = reg
        .parse_all(&[lump], &strings())
        .expect_err("fogdensity is not a legacy keyword");
    assert_eq!(
        err.to_string(),
        "BROKEN:3: Unknown MAPINFO token \"fogdensity\""
    );
}

#[test]
fn brace_forces_modern_rules() {
    let err = parse("map MAP01 \"A\" {\n  par 30\n}").expect_err("missing =");
    assert!(matches!(err, MapInfoError::Script { line: 2, .. }));
}

#[test]
fn last_assignment_wins() {
    let reg = parse(r#"map MAP01 "A" { par = 10 par = 20 }"#).expect("parse");
    assert_eq!(reg.find_level_info("MAP01").expect("MAP01").par_time, 20);
}

#[test]
fn jump_flags_are_exclusive() {
    let reg = parse(r#"map MAP01 "A" { nojump allowjump }"#).expect("parse");
    let flags = reg.find_level_info("MAP01").expect("MAP01").flags;
    assert!(flags.contains(LevelFlags::JUMP_YES));
    assert!(!flags.contains(LevelFlags::JUMP_NO));
}

#[test]
fn reparsing_a_map_does_not_grow_registry() {
    let lump = read_lump("zmapinfo.txt", "ZMAPINFO");
    let mut reg = Registry::new();
    reg.parse_lump(&lump.data, &lump.name, &strings()).expect("first");
    let levels = reg.levels().len();
    let clusters = reg.clusters().len();
    reg.parse_lump(&lump.data, &lump.name, &strings()).expect("second");
    assert_eq!(reg.levels().len(), levels);
    assert_eq!(reg.clusters().len(), clusters);
}

#[test]
fn legacy_base_lump() {
    let lump = read_lump("doom2_base.txt", "_D2NFO");
    let mut reg = Registry::new();
    reg.parse_all(&[lump], &strings()).expect("parse");

    assert_eq!(reg.levels().len(), 3);
    let map01 = reg.find_level_info("MAP01").expect("MAP01");
    assert_eq!(map01.level_name.as_deref(), Some("level 1: entryway"));
    assert_eq!(map01.title_patch.as_str(), "CWILV00");
    assert_eq!(map01.next_map.as_str(), "MAP02");
    assert_eq!(map01.par_time, 30);
    assert_eq!(map01.music.as_str(), "D_RUNNIN");
    assert_eq!(map01.level_num, 1);
    assert_eq!(map01.outside_fog_color, Argb::NO_FOG);
    assert_eq!(map01.fade_table.as_str(), "COLORMAP");

    let map07 = reg.find_level_by_num(7).expect("MAP07");
    assert!(map07.flags.contains(LevelFlags::MAP07SPECIAL));

    let cluster = reg.find_cluster_info(5).expect("cluster 5");
    assert_eq!(cluster.finale_flat.as_str(), "SLIME16");
    assert_eq!(cluster.message_music.as_str(), "D_READ_M");
    assert!(
        cluster
            .exit_text
            .as_deref()
            .is_some_and(|t| t.starts_with("YOU HAVE ENTERED"))
    );
    assert!(!cluster.is_hub());
    assert!(!reg.numbered_maps());
}

#[test]
fn modern_override_lump() {
    let lump = read_lump("zmapinfo.txt", "ZMAPINFO");
    let mut reg = Registry::new();
    reg.parse_all(&[lump], &strings()).expect("parse");

    assert_eq!(reg.levels().len(), 1);
    let level = reg.find_level_info("MAP01").expect("MAP01");
    assert_eq!(level.sky1.as_str(), "SKY2");
    assert_eq!(level.par_time, 20);
    assert_eq!(level.fade_color, Argb::opaque(0x10, 0x20, 0x30));
    assert_eq!(level.outside_fog_color, Argb::opaque(0x40, 0x50, 0x60));
    assert_eq!(level.music.as_str(), "D_DM2TTL");
    assert_eq!(level.gravity, 400.0);
    assert_eq!(level.air_control, 0.25);
    assert!(level.flags.contains(LevelFlags::JUMP_NO));
    assert!(!level.flags.contains(LevelFlags::JUMP_YES));

    let cluster = reg.find_cluster_info(1).expect("cluster 1");
    assert!(cluster.is_hub());
    assert_eq!(
        cluster.exit_text.as_deref(),
        Some("You have left the entryway.")
    );
}

#[test]
fn later_lumps_layer_over_base() {
    let base = read_lump("doom2_base.txt", "_D2NFO");
    let lumps = vec![
        read_lump("broken_legacy.txt", "MAPINFO"),
        read_lump("zmapinfo.txt", "ZMAPINFO"),
    ];
    let ordered = load_order(base, lumps);
    assert_eq!(ordered.len(), 2);

    let mut reg = Registry::new();
    reg.parse_all(&ordered, &strings()).expect("parse");

    assert_eq!(reg.levels().len(), 3);
    let map01 = reg.find_level_info("MAP01").expect("MAP01");
    assert_eq!(map01.level_name.as_deref(), Some("Entryway"));
    assert_eq!(map01.cluster, 1);
    assert!(map01.title_patch.is_empty());

    let map02 = reg.find_level_info("MAP02").expect("MAP02");
    assert_eq!(map02.music.as_str(), "D_STALKS");
    assert_eq!(reg.clusters().len(), 2);
}

#[test]
fn numbered_maps_make_hubs() {
    let lump = read_lump("hexen.txt", "MAPINFO");
    let mut reg = Registry::new();
    reg.parse_all(&[lump], &strings()).expect("parse");

    assert!(reg.numbered_maps());
    assert_eq!(reg.levels().len(), 3);
    assert!(reg.find_cluster_info(1).expect("cluster 1").is_hub());
    assert!(reg.find_cluster_info(2).expect("cluster 2").is_hub());

    let hall = reg.find_level_by_num(1).expect("MAP01");
    assert_eq!(hall.next_map.as_str(), "MAP02");
    assert!(hall.flags.contains(LevelFlags::DOUBLESKY));
    assert!(hall.flags.contains(LevelFlags::NUMBERED_MAP_DEFAULTS));

    let portals = reg.find_level_info("MAP02").expect("MAP02");
    assert_eq!(portals.sky2.as_str(), "SKY3");

    let darkmere = reg.find_level_by_num(40).expect("MAP40");
    assert_eq!(darkmere.fade_table.as_str(), "FOGMAP");
    assert_eq!(darkmere.outside_fog_color, Argb::opaque(0x7f, 0x7f, 0x7f));
    assert_eq!(darkmere.next_map.as_str(), "MAP01");
}
