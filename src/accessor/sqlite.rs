//! accessor::sqlite
//!
//! Read-only accessor over a sqlite table column.
//!
//! # Design
//!
//! Neighbor queries compile to aggregate lookups against a caller-named
//! table and column: `MIN(col)`, `MAX(col)`, `MAX(col) WHERE col < ?`,
//! `MIN(col) WHERE col > ?`. The accessor never writes; after `insert`
//! generates a key, the caller persists the row itself. The column must
//! be `TEXT` under the default `BINARY` collation so that SQL comparison
//! order equals the lexicographic order of the mapped keys.
//!
//! Table and column names are validated as plain identifiers at
//! construction time, since they are interpolated into SQL; values always
//! travel as bound parameters.
//!
//! # Consistency
//!
//! The four reads of one insert are independent queries. If another
//! writer changes the table between the neighbor reads and the caller's
//! eventual `INSERT`, the generated key may no longer fall strictly
//! between the now-current neighbors. The accessor does not provide
//! cross-call atomicity; embedders that need it wrap the whole
//! read-generate-persist step in a serializable transaction.

use rusqlite::{params, Connection};
use thiserror::Error;

use super::{Accessor, IdentityMapping, KeyMapping};
use crate::indexer::Indexer;

/// A table or column name that is not a plain SQL identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid sql identifier: {0:?}")]
pub struct InvalidIdentifier(String);

/// Indexer over a sqlite-backed accessor.
pub type SqliteIndexer<'c, M = IdentityMapping> = Indexer<SqliteAccessor<'c>, M>;

/// Read-only neighbor queries over one column of a sqlite table.
///
/// # Example
///
/// ```
/// use fracindex::SqliteAccessor;
/// use rusqlite::Connection;
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute("CREATE TABLE items (id TEXT PRIMARY KEY)", []).unwrap();
///
/// let idx = SqliteAccessor::new(&conn, "items", "id").unwrap().indexer();
/// let key = idx.insert(None, None).unwrap();
/// // The caller persists the row; the indexer never writes.
/// conn.execute("INSERT INTO items (id) VALUES (?1)", [key.as_str()]).unwrap();
/// ```
#[derive(Debug)]
pub struct SqliteAccessor<'c> {
    conn: &'c Connection,
    table: String,
    column: String,
}

impl<'c> SqliteAccessor<'c> {
    /// Accessor over `table`.`column` on an open connection.
    ///
    /// # Errors
    ///
    /// [`InvalidIdentifier`] if either name is not a plain identifier
    /// (ASCII letters, digits, `_`, not starting with a digit).
    pub fn new(
        conn: &'c Connection,
        table: &str,
        column: &str,
    ) -> Result<Self, InvalidIdentifier> {
        validate_identifier(table)?;
        validate_identifier(column)?;
        Ok(SqliteAccessor {
            conn,
            table: table.to_string(),
            column: column.to_string(),
        })
    }

    /// Indexer over this accessor with names used directly as keys.
    pub fn indexer(self) -> SqliteIndexer<'c> {
        Indexer::new(self, IdentityMapping)
    }

    /// Indexer over this accessor with a caller-supplied name mapping.
    pub fn indexer_with<M: KeyMapping<String>>(self, mapping: M) -> SqliteIndexer<'c, M> {
        Indexer::new(self, mapping)
    }

    /// One aggregate query; `bound` adds a `WHERE column <op> ?1` clause.
    ///
    /// Aggregates always return a row, NULL on an empty match, which maps
    /// cleanly onto the accessor's explicit-absence contract.
    fn fetch_extreme(
        &self,
        agg: &str,
        bound: Option<(&str, &str)>,
    ) -> Result<Option<String>, rusqlite::Error> {
        let (table, column) = (&self.table, &self.column);
        match bound {
            None => {
                let sql = format!("SELECT {agg}({column}) FROM {table}");
                self.conn.query_row(&sql, [], |row| row.get(0))
            }
            Some((op, value)) => {
                let sql = format!("SELECT {agg}({column}) FROM {table} WHERE {column} {op} ?1");
                self.conn.query_row(&sql, params![value], |row| row.get(0))
            }
        }
    }
}

impl Accessor for SqliteAccessor<'_> {
    type Name = String;
    type Error = rusqlite::Error;

    fn first(&self) -> Result<Option<String>, rusqlite::Error> {
        self.fetch_extreme("MIN", None)
    }

    fn last(&self) -> Result<Option<String>, rusqlite::Error> {
        self.fetch_extreme("MAX", None)
    }

    fn before(&self, name: &String) -> Result<Option<String>, rusqlite::Error> {
        self.fetch_extreme("MAX", Some(("<", name)))
    }

    fn after(&self, name: &String) -> Result<Option<String>, rusqlite::Error> {
        self.fetch_extreme("MIN", Some((">", name)))
    }
}

fn validate_identifier(name: &str) -> Result<(), InvalidIdentifier> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE test (id TEXT PRIMARY KEY)", [])
            .unwrap();
        conn
    }

    fn add_row(conn: &Connection, id: &str) {
        conn.execute("INSERT INTO test (id) VALUES (?1)", params![id])
            .unwrap();
    }

    #[test]
    fn identifier_validation() {
        assert!(validate_identifier("items").is_ok());
        assert!(validate_identifier("_sort_key2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("items; DROP TABLE x").is_err());
        assert!(validate_identifier("a-b").is_err());
    }

    #[test]
    fn neighbor_queries() {
        let conn = test_conn();
        for id in ["a0", "a1", "a2"] {
            add_row(&conn, id);
        }
        let acc = SqliteAccessor::new(&conn, "test", "id").unwrap();
        assert_eq!(acc.first().unwrap(), Some("a0".to_string()));
        assert_eq!(acc.last().unwrap(), Some("a2".to_string()));
        assert_eq!(
            acc.before(&"a1".to_string()).unwrap(),
            Some("a0".to_string())
        );
        assert_eq!(
            acc.after(&"a1".to_string()).unwrap(),
            Some("a2".to_string())
        );
        assert_eq!(acc.before(&"a0".to_string()).unwrap(), None);
        assert_eq!(acc.after(&"a2".to_string()).unwrap(), None);
    }

    #[test]
    fn empty_table_is_all_absent() {
        let conn = test_conn();
        let acc = SqliteAccessor::new(&conn, "test", "id").unwrap();
        assert_eq!(acc.first().unwrap(), None);
        assert_eq!(acc.last().unwrap(), None);
    }

    #[test]
    fn missing_table_error_passes_through() {
        let conn = Connection::open_in_memory().unwrap();
        let acc = SqliteAccessor::new(&conn, "nope", "id").unwrap();
        assert!(acc.first().is_err());
    }

    #[test]
    fn indexer_scenario_identity_names() {
        let conn = test_conn();
        let idx = SqliteAccessor::new(&conn, "test", "id").unwrap().indexer();

        let i1 = idx.insert(None, None).unwrap();
        add_row(&conn, i1.as_str());
        assert!(i1.as_str().starts_with('a'));

        let i2 = idx.insert(Some(&i1.to_string()), None).unwrap();
        add_row(&conn, i2.as_str());
        assert!(i2 > i1);

        let i3 = idx.insert(None, Some(&i2.to_string())).unwrap();
        add_row(&conn, i3.as_str());
        assert!(i1 < i3 && i3 < i2);

        let names: Vec<String> = idx.iter().map(|r| r.unwrap()).collect();
        assert_eq!(names, vec![i1.to_string(), i3.to_string(), i2.to_string()]);
    }

    #[test]
    fn indexer_scenario_mapped_names() {
        let conn = test_conn();
        let mapping = |name: &String| Key::new(name.strip_prefix("msg-")?).ok();
        let idx = SqliteAccessor::new(&conn, "test", "id")
            .unwrap()
            .indexer_with(mapping);

        let add = |key: &Key| {
            let name = format!("msg-{key}");
            add_row(&conn, &name);
            name
        };

        let i1 = idx.insert(None, None).unwrap();
        let n1 = add(&i1);
        let i2 = idx.insert(Some(&n1), None).unwrap();
        let n2 = add(&i2);
        assert!(i2 > i1);
        let i3 = idx.insert(None, Some(&n2)).unwrap();
        let n3 = add(&i3);
        assert!(i1 < i3 && i3 < i2);

        // Round-trip: every persisted name maps back to its key.
        for (name, key) in [(&n1, &i1), (&n2, &i2), (&n3, &i3)] {
            assert_eq!(mapping.key_for(name).as_ref(), Some(key));
        }

        let names: Vec<String> = idx.iter().map(|r| r.unwrap()).collect();
        assert_eq!(names, vec![n1, n3, n2]);
    }
}
