use dragon_ball_core::db::{initialize_schema, open_db};
use dragon_ball_core::seed::{seed_database, SEED_CHARACTERS, SEED_SERIES};
use dragon_ball_core::{
    delete_by_id, fetch_all, update_fields, CharacterPatch, CharacterRepository, Patch, Record,
    SqliteCharacterRepository, Table,
};

#[test]
fn seed_update_delete_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("dragon_ball.db")).unwrap();
    initialize_schema(&conn).unwrap();

    let mut inserted = Vec::new();
    let report = seed_database(&conn, |table, id| inserted.push((table, id))).unwrap();
    assert_eq!(report.series_ids, vec![1, 2, 3, 4]);
    assert_eq!(report.character_ids.len(), SEED_CHARACTERS.len());
    assert_eq!(inserted.len(), SEED_SERIES.len() + SEED_CHARACTERS.len());
    assert_eq!(inserted[0], (Table::Series, 1));
    assert_eq!(inserted[SEED_SERIES.len()], (Table::Characters, 1));

    assert_eq!(fetch_all(&conn, Table::Series).unwrap().len(), SEED_SERIES.len());
    let before = fetch_all(&conn, Table::Characters).unwrap();
    assert_eq!(before.len(), SEED_CHARACTERS.len());

    let patch = Patch::Character(CharacterPatch {
        episode_count: Some(154),
        ..CharacterPatch::default()
    });
    update_fields(&conn, 1, &patch).unwrap();
    delete_by_id(&conn, Table::Characters, 7).unwrap();

    let after = fetch_all(&conn, Table::Characters).unwrap();
    assert_eq!(after.len(), SEED_CHARACTERS.len() - 1);
    assert!(after.iter().all(|record| record.id() != 7));

    let goku = after
        .iter()
        .find_map(|record| match record {
            Record::Character(character) if character.id == 1 => Some(character),
            _ => None,
        })
        .unwrap();
    assert_eq!(goku.name, "Goku");
    assert_eq!(goku.episode_count, 154);
    assert_eq!(
        goku.to_string(),
        "(1, 1, 'Goku', 1, 154, 'No')"
    );
}

#[test]
fn every_seeded_character_points_at_a_seeded_series() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("dragon_ball.db")).unwrap();
    initialize_schema(&conn).unwrap();
    let report = seed_database(&conn, |_, _| {}).unwrap();

    let characters = SqliteCharacterRepository::new(&conn)
        .list_characters()
        .unwrap();
    assert!(characters
        .iter()
        .all(|character| report.series_ids.contains(&character.series_id)));
}
