use super::*;
use serde_json::json;

#[test]
fn test_operator_deserialization() {
    let raw = json!({
        "name": "Sledge",
        "safename": "sledge",
        "realname": "Seamus Cowden",
        "side": "attacker",
        "health": 125,
        "speed": 2,
        "roles": ["breach"],
        "unit": "SAS",
        "birthplace": "John O'Groats, Scotland",
        "season_introduced": "Release"
    });

    let op: Operator = serde_json::from_value(raw).unwrap();
    assert_eq!(op.name, "Sledge");
    assert_eq!(op.side, Side::Attacker);
    assert_eq!(op.health, 125);
    assert_eq!(op.speed, 2);
    assert_eq!(op.roles, vec!["breach"]);
}

#[test]
fn test_operator_missing_optional_fields() {
    // Only the fields the join and scorer depend on are required.
    let raw = json!({
        "name": "Mute",
        "side": "defender",
        "health": 125,
        "speed": 2
    });

    let op: Operator = serde_json::from_value(raw).unwrap();
    assert_eq!(op.name, "Mute");
    assert_eq!(op.side, Side::Defender);
    assert!(op.roles.is_empty());
    assert!(op.unit.is_empty());
    assert!(op.season_introduced.is_empty());
}

#[test]
fn test_weapon_deserialization_wire_names() {
    let raw = json!({
        "name": "L85A2",
        "type": "Assault Rifle",
        "damage": 47,
        "fireRate": 670,
        "mobility": 50,
        "class": "Primary",
        "family": "ATK",
        "operators": ["Sledge", "Thatcher"],
        "availableFor": ["Sledge"]
    });

    let weapon: Weapon = serde_json::from_value(raw).unwrap();
    assert_eq!(weapon.weapon_type, "Assault Rifle");
    assert_eq!(weapon.fire_rate, Some(670));
    assert_eq!(weapon.operators.len(), 2);
    assert_eq!(weapon.available_for.as_deref(), Some(&["Sledge".to_string()][..]));
}

#[test]
fn test_weapon_without_fire_rate() {
    let raw = json!({
        "name": "Shield",
        "type": "Shield",
        "damage": 5,
        "operators": ["Montagne"]
    });

    let weapon: Weapon = serde_json::from_value(raw).unwrap();
    assert_eq!(weapon.fire_rate, None);
    assert!(weapon.family.is_none());
}

#[test]
fn test_map_deserialization() {
    let raw = json!({
        "name": "Clubhouse",
        "location": "Germany",
        "releaseDate": "2015-12-01",
        "playlists": "ranked,casual",
        "mapReworked": "Y5S3"
    });

    let map: Map = serde_json::from_value(raw).unwrap();
    assert_eq!(map.name, "Clubhouse");
    assert_eq!(map.release_date, "2015-12-01");
    assert_eq!(map.map_reworked.as_deref(), Some("Y5S3"));
}

#[test]
fn test_player_ranked_profile_deserialization() {
    let raw = json!({
        "rank": 24,
        "rank_points": 3950,
        "max_rank": 27,
        "max_rank_points": 4210,
        "season_statistics": {
            "kills": 312,
            "deaths": 260,
            "match_outcomes": { "wins": 40, "losses": 31, "abandons": 1 }
        }
    });

    let profile: PlayerRankedProfile = serde_json::from_value(raw).unwrap();
    assert_eq!(profile.rank, 24);
    assert_eq!(profile.rank_points, 3950);
    assert_eq!(profile.season_statistics.kills, 312);
    assert_eq!(profile.season_statistics.match_outcomes.wins, 40);
}

#[test]
fn test_side_from_str() {
    assert_eq!("attacker".parse::<Side>().unwrap(), Side::Attacker);
    assert_eq!("ATK".parse::<Side>().unwrap(), Side::Attacker);
    assert_eq!("Defender".parse::<Side>().unwrap(), Side::Defender);
    assert!("spectator".parse::<Side>().is_err());
}

#[test]
fn test_platform_and_board_display() {
    assert_eq!(Platform::Uplay.to_string(), "uplay");
    assert_eq!(Platform::Xbl.to_string(), "xbl");
    assert_eq!(Board::Ranked.to_string(), "ranked");
    assert_eq!(Board::Event.to_string(), "event");
}

#[test]
fn test_team_member_without_ranked_profile() {
    let raw = json!({ "name": "smurf", "level": 12 });
    let member: TeamMember = serde_json::from_value(raw).unwrap();
    assert!(member.ranked.is_none());
    assert_eq!(member.level, 12);
}
