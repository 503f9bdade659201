//! Field Accessor Tables
//!
//! Each resource kind publishes a static table mapping an upper-case field
//! name to a typed extraction function. Filters and sort keys are matched
//! against these names case-insensitively.

/// Value extracted from a resource field
///
/// Variants only ever compare against values of the same field, so the
/// derived ordering is the natural one for each kind of value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Named accessor for one field of `T`
pub struct Field<T> {
    /// Upper-case field name
    pub name: &'static str,
    /// Whether `sortKey` may name this field
    pub sortable: bool,
    pub get: fn(&T) -> FieldValue,
}

impl<T> Field<T> {
    pub fn value(&self, item: &T) -> FieldValue {
        (self.get)(item)
    }

    /// Case-insensitive name match
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Find a field by case-insensitive name
pub fn lookup<'a, T>(fields: &'a [Field<T>], name: &str) -> Option<&'a Field<T>> {
    fields.iter().find(|f| f.matches(name))
}

/// Names of the sortable fields, in table order
pub fn sortable_keys<T>(fields: &[Field<T>]) -> Vec<&'static str> {
    fields.iter().filter(|f| f.sortable).map(|f| f.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dock, Profile, Stored, StoragePool};

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("abc".into()).to_string(), "abc");
        assert_eq!(FieldValue::Int(-12).to_string(), "-12");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_sortable_key_tables() {
        assert_eq!(
            sortable_keys(Dock::fields()),
            vec!["ID", "NAME", "STATUS", "ENDPOINT", "DRIVERNAME", "DESCRIPTION"]
        );
        assert_eq!(
            sortable_keys(StoragePool::fields()),
            vec!["ID", "NAME", "STATUS", "AVAILABILITYZONE", "DOCKID"]
        );
        assert_eq!(sortable_keys(Profile::fields()), vec!["ID", "NAME", "DESCRIPTION"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dock = Dock {
            driver_name: "lvm".into(),
            ..Default::default()
        };
        let field = lookup(Dock::fields(), "driverName").unwrap();
        assert_eq!(field.value(&dock), FieldValue::Text("lvm".into()));
        assert!(lookup(Dock::fields(), "capacity").is_none());
    }
}
