//! Flat records and the cleaning of their identifying fields.

use std::fmt;

/// Record type of a top-level database entry.
pub const DATABASE: &str = "DATABASE";

/// Record type of a table entry.
pub const TABLE: &str = "TABLE";

/// Record type of a column entry.
pub const COLUMN: &str = "COLUMN";

/// The number of positional fields in a source line.
pub const FIELD_COUNT: usize = 7;

/// One row of a schema export, prior to hierarchy reconstruction.
///
/// A record is identified for linking purposes by its (`record_type`,
/// `name`) pair, and points at its parent through (`parent_type`,
/// `parent_name`). Neither pair is required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    /// The type discriminator, e.g. `DATABASE`, `TABLE` or `COLUMN`.
    ///
    /// Any text is accepted. Normalization upper-cases it.
    pub record_type: String,

    /// The identifier of this record within its type.
    pub name: String,

    /// The owning schema. Empty for databases.
    pub schema: String,

    /// The name of the parent record. Empty for top-level records.
    pub parent_name: String,

    /// The type of the parent record. Empty for top-level records.
    pub parent_type: String,

    /// Free-text type descriptor of a column.
    pub data_type: String,

    /// Raw nullability flag. `1` means nullable.
    pub is_nullable: String,

    /// Number of records naming this one as their parent.
    ///
    /// Only the linker writes this.
    pub(in crate::domain) child_count: usize,
}

impl FlatRecord {
    /// Creates a record with the given type and name and all other fields
    /// empty.
    #[must_use]
    pub fn new(record_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a record from the seven positional source fields.
    ///
    /// The order is: type, name, schema, parent name, parent type, data type,
    /// nullability.
    #[must_use]
    pub fn from_fields(fields: [&str; FIELD_COUNT]) -> Self {
        let [
            record_type,
            name,
            schema,
            parent_name,
            parent_type,
            data_type,
            is_nullable,
        ] = fields;

        Self {
            record_type: record_type.to_string(),
            name: name.to_string(),
            schema: schema.to_string(),
            parent_name: parent_name.to_string(),
            parent_type: parent_type.to_string(),
            data_type: data_type.to_string(),
            is_nullable: is_nullable.to_string(),
            child_count: 0,
        }
    }

    /// Sets the parent reference.
    #[must_use]
    pub fn with_parent(mut self, parent_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.parent_type = parent_type.into();
        self.parent_name = name.into();
        self
    }

    /// Sets the owning schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Sets the column data type and nullability flag.
    #[must_use]
    pub fn with_data_type(
        mut self,
        data_type: impl Into<String>,
        is_nullable: impl Into<String>,
    ) -> Self {
        self.data_type = data_type.into();
        self.is_nullable = is_nullable.into();
        self
    }

    /// The number of records that declare this record as their parent.
    ///
    /// This is zero until the collection has been linked.
    #[must_use]
    pub const fn child_count(&self) -> usize {
        self.child_count
    }

    /// Whether this record has no parent reference.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_type.is_empty()
    }

    /// Whether the nullability flag marks this column as nullable.
    ///
    /// The flag is trimmed before comparison, so `"1 "` is nullable.
    #[must_use]
    pub fn accepts_nulls(&self) -> bool {
        self.is_nullable.trim() == "1"
    }

    /// The parent type upper-cased, as the outline compares it against
    /// record types.
    ///
    /// Returns `None` for top-level records.
    #[must_use]
    pub fn parent_type_key(&self) -> Option<String> {
        (!self.is_top_level()).then(|| self.parent_type.to_uppercase())
    }

    /// Whether the outline lists this record under `parent`.
    ///
    /// The parent type is compared upper-cased, so a `table` parent type
    /// matches a `TABLE` record. Child counts compare exactly, see
    /// [`link_children`](crate::domain::link_children).
    ///
    /// An empty parent type never matches anything, including a record with
    /// an empty type.
    #[must_use]
    pub fn is_child_of(&self, parent: &Self) -> bool {
        self.parent_name == parent.name
            && self
                .parent_type_key()
                .is_some_and(|parent_type| parent_type == parent.record_type)
    }

    /// Cleans the identifying fields in place.
    ///
    /// `record_type`, `name`, `schema`, `parent_name` and `parent_type` are
    /// passed through [`clean_field`], and `record_type` is upper-cased.
    /// `data_type` and `is_nullable` are left untouched.
    pub fn normalize(&mut self) {
        self.record_type = clean_field(&self.record_type).to_uppercase();
        self.name = clean_field(&self.name);
        self.schema = clean_field(&self.schema);
        self.parent_name = clean_field(&self.parent_name);
        self.parent_type = clean_field(&self.parent_type);
    }

    /// Returns a normalized copy of this record.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

impl fmt::Display for FlatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.record_type, self.name)
    }
}

/// Strips surrounding whitespace and removes every space and line break.
///
/// Empty input yields empty output.
#[must_use]
pub fn clean_field(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\r'))
        .collect()
}
