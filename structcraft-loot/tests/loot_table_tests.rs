use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structcraft_loot::{
    ItemStack, LootItem, LootTable, LootTableError, LootTableHandler, NoCustomItems,
};

const TREASURE_YAML: &str = "\
Rolls: 4
Items:
  sword:
    Name: '&aVery Cool Sword'
    Type: DIAMOND_SWORD
    Amount: 1
    Weight: 1
    Lore:
      - A sword forged in the depths
    Enchantments:
      sharpness: 3
      unbreaking: 2
  bread:
    Type: BREAD
    Amount: 1-3
    Weight: 9
";

fn write_table(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(format!("{name}.yml")), body).unwrap();
}

#[test]
fn loads_inline_items_with_metadata() {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), "treasure", TREASURE_YAML);

    let table = LootTable::load(dir.path(), "treasure", &NoCustomItems).unwrap();
    assert_eq!(table.name(), "treasure");
    assert_eq!(table.rolls(), 4);
    assert_eq!(table.items().len(), 2);

    let sword = table
        .items()
        .iter()
        .find(|item| matches!(item, LootItem::Inline { material, .. } if material == "DIAMOND_SWORD"))
        .unwrap();
    match sword {
        LootItem::Inline {
            name,
            amount,
            weight,
            lore,
            enchantments,
            ..
        } => {
            assert_eq!(name.as_deref(), Some("&aVery Cool Sword"));
            assert_eq!(amount, "1");
            assert_eq!(*weight, 1);
            assert_eq!(lore, &["A sword forged in the depths"]);
            assert_eq!(enchantments.get("sharpness").map(String::as_str), Some("3"));
            assert_eq!(enchantments.get("unbreaking").map(String::as_str), Some("2"));
        }
        LootItem::Custom { .. } => unreachable!(),
    }
}

#[test]
fn draws_return_resolved_items() {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), "treasure", TREASURE_YAML);

    let table = LootTable::load(dir.path(), "treasure", &NoCustomItems).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..table.rolls() {
        let stack = table.draw_one(&mut rng).unwrap();
        assert!(["DIAMOND_SWORD", "BREAD"].contains(&stack.material.as_str()));
    }
}

#[test]
fn missing_table_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = LootTable::load(dir.path(), "absent", &NoCustomItems).unwrap_err();
    assert!(matches!(err, LootTableError::NotFound(name) if name == "absent"));
}

#[test]
fn missing_rolls_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_table(
        dir.path(),
        "broken",
        "Items:\n  bread:\n    Type: BREAD\n    Amount: 1\n    Weight: 1\n",
    );

    let err = LootTable::load(dir.path(), "broken", &NoCustomItems).unwrap_err();
    assert!(matches!(err, LootTableError::MissingRolls));
}

#[test]
fn missing_items_section_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), "broken", "Rolls: 2\n");

    let err = LootTable::load(dir.path(), "broken", &NoCustomItems).unwrap_err();
    assert!(matches!(err, LootTableError::MissingItems));
}

#[test]
fn missing_item_field_names_the_item() {
    let dir = tempfile::tempdir().unwrap();
    write_table(
        dir.path(),
        "broken",
        "Rolls: 1\nItems:\n  bread:\n    Type: BREAD\n    Weight: 1\n",
    );

    let err = LootTable::load(dir.path(), "broken", &NoCustomItems).unwrap_err();
    match err {
        LootTableError::MissingField { item, field } => {
            assert_eq!(item, "bread");
            assert_eq!(field, "Amount");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_integer_weight_fails_that_item() {
    let dir = tempfile::tempdir().unwrap();
    write_table(
        dir.path(),
        "broken",
        "Rolls: 1\nItems:\n  bread:\n    Type: BREAD\n    Amount: 1\n    Weight: abc\n",
    );

    let err = LootTable::load(dir.path(), "broken", &NoCustomItems).unwrap_err();
    assert!(matches!(err, LootTableError::InvalidWeight { item } if item == "bread"));
}

#[test]
fn zero_weight_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_table(
        dir.path(),
        "broken",
        "Rolls: 1\nItems:\n  bread:\n    Type: BREAD\n    Amount: 1\n    Weight: 0\n",
    );

    let err = LootTable::load(dir.path(), "broken", &NoCustomItems).unwrap_err();
    assert!(matches!(err, LootTableError::InvalidWeight { item } if item == "bread"));
}

const CUSTOM_YAML: &str = "\
Rolls: 2
Items:
  relic:
    Type: CUSTOM
    Key: ancient_relic
    Amount: 1
    Weight: 5
  ghost:
    Type: CUSTOM
    Key: no_such_item
    Amount: 1
    Weight: 5
  bread:
    Type: BREAD
    Amount: 1
    Weight: 1
";

fn relic_registry() -> HashMap<String, ItemStack> {
    let mut registry = HashMap::new();
    let mut relic = ItemStack::new("NETHERITE_INGOT", "1");
    relic.name = Some("Ancient Relic".to_owned());
    registry.insert("ancient_relic".to_owned(), relic);
    registry
}

#[test]
fn resolvable_custom_items_are_included() {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), "custom", CUSTOM_YAML);

    let table = LootTable::load(dir.path(), "custom", &relic_registry()).unwrap();
    assert!(table
        .items()
        .iter()
        .any(|item| matches!(item, LootItem::Custom { key, .. } if key == "ancient_relic")));

    // Custom draws carry the entry's declared amount over the registry item.
    let mut rng = StdRng::seed_from_u64(3);
    let mut saw_relic = false;
    for _ in 0..200 {
        let stack = table.draw_one(&mut rng).unwrap();
        if stack.material == "NETHERITE_INGOT" {
            assert_eq!(stack.name.as_deref(), Some("Ancient Relic"));
            assert_eq!(stack.amount, "1");
            saw_relic = true;
        }
    }
    assert!(saw_relic);
}

#[test]
fn unresolvable_custom_item_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), "custom", CUSTOM_YAML);

    let table = LootTable::load(dir.path(), "custom", &relic_registry()).unwrap();
    assert_eq!(table.rolls(), 2);
    assert_eq!(table.items().len(), 2);
    assert!(!table
        .items()
        .iter()
        .any(|item| matches!(item, LootItem::Custom { key, .. } if key == "no_such_item")));
}

#[test]
fn custom_entry_requires_a_key() {
    let dir = tempfile::tempdir().unwrap();
    write_table(
        dir.path(),
        "broken",
        "Rolls: 1\nItems:\n  relic:\n    Type: custom\n    Amount: 1\n    Weight: 1\n",
    );

    let err = LootTable::load(dir.path(), "broken", &NoCustomItems).unwrap_err();
    assert!(matches!(
        err,
        LootTableError::MissingField { field: "Key", .. }
    ));
}

#[test]
fn empty_table_cannot_draw() {
    let dir = tempfile::tempdir().unwrap();
    write_table(
        dir.path(),
        "ghosts",
        "Rolls: 1\nItems:\n  ghost:\n    Type: CUSTOM\n    Key: nope\n    Amount: 1\n    Weight: 1\n",
    );

    let table = LootTable::load(dir.path(), "ghosts", &NoCustomItems).unwrap();
    assert!(table.is_empty());
    let mut rng = StdRng::seed_from_u64(5);
    assert!(table.draw_one(&mut rng).is_err());
}

#[test]
fn handler_caches_by_name_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), "treasure", TREASURE_YAML);

    let mut handler = LootTableHandler::new(dir.path(), Box::new(NoCustomItems));
    assert_eq!(handler.get_or_load("treasure").unwrap().rolls(), 4);
    assert!(handler.get("treasure").is_some());
    assert_eq!(handler.loaded_names(), vec!["treasure"]);

    // A definition change is only visible after a reload.
    write_table(
        dir.path(),
        "treasure",
        "Rolls: 9\nItems:\n  bread:\n    Type: BREAD\n    Amount: 1\n    Weight: 1\n",
    );
    assert_eq!(handler.get_or_load("treasure").unwrap().rolls(), 4);
    handler.reload();
    assert_eq!(handler.get_or_load("treasure").unwrap().rolls(), 9);

    assert!(matches!(
        handler.get_or_load("absent"),
        Err(LootTableError::NotFound(_))
    ));
}
