use std::fmt;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

/// Project identifier in its native representation.
///
/// Keys provisioned as integers stay integers in storage.
/// Comparisons against request paths go through [`ProjectKey::matches`],
/// which compares string renderings so `7` and `"7"` are the same project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectKey {
    Numeric(i64),
    Text(String),
}

impl ProjectKey {
    pub fn matches(&self, other: &str) -> bool {
        match self {
            ProjectKey::Text(key) => key == other,
            ProjectKey::Numeric(_) => self.to_string() == other,
        }
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKey::Numeric(n) => write!(f, "{n}"),
            ProjectKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProjectKey {
    fn from(value: i64) -> Self {
        ProjectKey::Numeric(value)
    }
}

impl From<&str> for ProjectKey {
    fn from(value: &str) -> Self {
        ProjectKey::Text(value.to_string())
    }
}

impl From<String> for ProjectKey {
    fn from(value: String) -> Self {
        ProjectKey::Text(value)
    }
}

impl ToSql for ProjectKey {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            ProjectKey::Numeric(n) => n.to_sql(),
            ProjectKey::Text(s) => s.to_sql(),
        }
    }
}

impl FromSql for ProjectKey {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(n) => Ok(ProjectKey::Numeric(n)),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(|s| ProjectKey::Text(s.to_string()))
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// An organizational grouping that owns hubs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub key: ProjectKey,
    pub name: String,
}

impl Project {
    pub fn new(key: impl Into<ProjectKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}
