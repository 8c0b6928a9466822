//! Raw column metadata, one row per column of `system.schema_columns`.

/// Role of a column in the primary key, from the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyRole {
    PartitionKey,
    ClusteringKey,
    /// Anything else (`regular`, `static`, `compact_value`, ...).
    #[default]
    Regular,
}

impl KeyRole {
    /// Interpret the `type` column. Unknown values are regular columns.
    pub fn from_type(ty: &str) -> Self {
        match ty {
            "partition_key" => KeyRole::PartitionKey,
            "clustering_key" => KeyRole::ClusteringKey,
            _ => KeyRole::Regular,
        }
    }

    pub fn is_key(&self) -> bool {
        !matches!(self, KeyRole::Regular)
    }
}

/// One row of column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumnRow {
    pub keyspace_name: String,
    /// Table name.
    pub columnfamily_name: String,
    pub column_name: String,
    /// Validator class, see [`crate::parse_validator`].
    pub validator: String,
    pub kind: KeyRole,
    /// Position within the key role. Only meaningful for key columns.
    pub component_index: Option<u32>,
}

impl SchemaColumnRow {
    /// A regular column row.
    pub fn new(
        keyspace_name: impl Into<String>,
        columnfamily_name: impl Into<String>,
        column_name: impl Into<String>,
        validator: impl Into<String>,
    ) -> Self {
        Self {
            keyspace_name: keyspace_name.into(),
            columnfamily_name: columnfamily_name.into(),
            column_name: column_name.into(),
            validator: validator.into(),
            kind: KeyRole::Regular,
            component_index: None,
        }
    }

    /// Set the key role and component index.
    pub fn with_key(mut self, kind: KeyRole, component_index: u32) -> Self {
        self.kind = kind;
        self.component_index = Some(component_index);
        self
    }

    /// The `(keyspace, table)` pair this row belongs to.
    pub fn table_ref(&self) -> (&str, &str) {
        (&self.keyspace_name, &self.columnfamily_name)
    }

    pub fn belongs_to(&self, keyspace: &str, table: &str) -> bool {
        self.keyspace_name == keyspace && self.columnfamily_name == table
    }
}
