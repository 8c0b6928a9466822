use csm::{KeyRole, PrimaryKey, SchemaColumnRow, SchemaTree, SortOrder, table_diff};

const UUID: &str = "org.apache.cassandra.db.marshal.UUIDType";
const TEXT: &str = "org.apache.cassandra.db.marshal.UTF8Type";
const INT: &str = "org.apache.cassandra.db.marshal.Int32Type";
const TIMESTAMP: &str = "org.apache.cassandra.db.marshal.TimestampType";
const REVERSED_TIMESTAMP: &str = "org.apache.cassandra.db.marshal.ReversedType(org.apache.cassandra.db.marshal.TimestampType)";
const TAGS: &str =
    "org.apache.cassandra.db.marshal.SetType(org.apache.cassandra.db.marshal.UTF8Type)";

/// Rows for two keyspaces, in the order a node might return them.
fn rows() -> Vec<SchemaColumnRow> {
    vec![
        SchemaColumnRow::new("app", "events", "body", TEXT),
        SchemaColumnRow::new("app", "events", "ts", REVERSED_TIMESTAMP)
            .with_key(KeyRole::ClusteringKey, 0),
        SchemaColumnRow::new("app", "events", "day", INT).with_key(KeyRole::PartitionKey, 1),
        SchemaColumnRow::new("app", "events", "tenant", UUID).with_key(KeyRole::PartitionKey, 0),
        SchemaColumnRow::new("app", "events", "id", UUID).with_key(KeyRole::ClusteringKey, 1),
        SchemaColumnRow::new("app", "users", "id", UUID).with_key(KeyRole::PartitionKey, 0),
        SchemaColumnRow::new("app", "users", "tags", TAGS),
        SchemaColumnRow::new("audit", "log", "at", TIMESTAMP).with_key(KeyRole::PartitionKey, 0),
    ]
}

#[test]
fn test_schema_tree() {
    let tree = SchemaTree::build(&rows()).unwrap();

    assert_eq!(tree.keyspaces().collect::<Vec<_>>(), ["app", "audit"]);

    let events = tree.table("app", "events").unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events["ts"], "timestamp");
    assert_eq!(events["tenant"], "uuid");

    let users = tree.table("app", "users").unwrap();
    assert_eq!(users["tags"], "set<text>");

    assert_eq!(tree.keyspace("app").unwrap().len(), 2);
    assert_eq!(tree.table("audit", "log").unwrap()["at"], "timestamp");
}

#[test]
fn test_primary_key_of_one_table() {
    let rows = rows();
    let key = PrimaryKey::reconstruct(rows.iter().filter(|r| r.belongs_to("app", "events")))
        .unwrap();

    assert_eq!(key.partition_key(), ["tenant", "day"]);
    assert_eq!(key.clustering_key(), ["ts", "id"]);
    assert_eq!(key.order_of("ts"), Some(SortOrder::Desc));
    assert_eq!(key.order_of("id"), Some(SortOrder::Asc));
    assert!(!key.clustering_order().contains_key("tenant"));
    assert_eq!(
        key.to_string(),
        "PRIMARY KEY ((tenant, day), ts, id) WITH CLUSTERING ORDER BY (ts DESC, id ASC)"
    );
}

#[test]
fn test_primary_key_rejects_whole_keyspace() {
    let rows = rows();
    let err = PrimaryKey::reconstruct(rows.iter().filter(|r| r.keyspace_name == "app"))
        .unwrap_err();
    assert!(matches!(err, csm::Error::MultiTableInput { ref tables } if tables.len() == 2));
}

#[test]
fn test_diff_between_two_builds() {
    let before = SchemaTree::build(&rows()).unwrap();

    let mut rows = rows();
    rows.retain(|r| r.column_name != "body");
    rows.push(SchemaColumnRow::new("app", "events", "payload", TEXT));
    for row in rows.iter_mut().filter(|r| r.column_name == "day") {
        row.validator = TEXT.to_string();
    }
    let after = SchemaTree::build(&rows).unwrap();

    let diff = table_diff(
        after.table("app", "events").unwrap(),
        before.table("app", "events").unwrap(),
    );
    assert_eq!(diff.add()["payload"], "text");
    assert!(diff.remove().contains("body"));
    assert_eq!(diff.change()["day"].before, "text");
    assert_eq!(diff.change()["day"].after, "int");
    assert_eq!(diff.change_count(), 3);
}
