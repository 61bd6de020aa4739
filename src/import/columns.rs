use serde::Serialize;
use tracing::{debug, warn};

/// How a raw text value is coerced before it is bound to the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    /// Integer that must be present (externally supplied primary key).
    Key,
    /// Nullable integer (foreign keys).
    Integer,
    /// Nullable free text, passed through untouched.
    Text,
}

/// A canonical storage column and every header spelling that maps onto it.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub canonical: &'static str,
    pub synonyms: &'static [&'static str],
    pub kind: ColumnKind,
}

impl ColumnSpec {
    /// `header` must already be trimmed and lowercased.
    pub fn matches(&self, header: &str) -> bool {
        self.canonical == header || self.synonyms.iter().any(|s| *s == header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Replace any existing row sharing the primary key.
    Upsert,
    /// Always insert a new row.
    Append,
}

impl WritePolicy {
    pub fn insert_verb(self) -> &'static str {
        match self {
            WritePolicy::Upsert => "INSERT OR REPLACE",
            WritePolicy::Append => "INSERT",
        }
    }
}

/// Everything the importer needs to know about one target table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub table: &'static str,
    pub policy: WritePolicy,
    /// Required columns in insert order.
    pub columns: &'static [ColumnSpec],
}

impl TableSpec {
    pub fn insert_sql(&self) -> String {
        let names: Vec<&str> = self.columns.iter().map(|c| c.canonical).collect();
        let placeholders = vec!["?"; names.len()].join(", ");
        format!(
            "{} INTO {} ({}) VALUES ({})",
            self.policy.insert_verb(),
            self.table,
            names.join(", "),
            placeholders
        )
    }

    /// Resolve file headers against the synonym table.
    pub fn reconcile(&self, headers: &[String]) -> ColumnMap {
        let mut positions: Vec<Option<usize>> = vec![None; self.columns.len()];

        for (idx, raw) in headers.iter().enumerate() {
            let header = normalize_header(raw);
            match self.columns.iter().position(|c| c.matches(&header)) {
                Some(col) if positions[col].is_none() => positions[col] = Some(idx),
                Some(col) => warn!(
                    table = self.table,
                    header = %raw,
                    column = self.columns[col].canonical,
                    "duplicate header for column; keeping the first"
                ),
                None => debug!(table = self.table, header = %raw, "ignoring unknown header"),
            }
        }

        ColumnMap {
            positions,
            width: headers.len(),
        }
    }
}

pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Field index in the source record for every required column, in
/// `TableSpec::columns` order. `None` marks a synthesized all-null column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub positions: Vec<Option<usize>>,
    pub width: usize,
}

impl ColumnMap {
    pub fn missing<'a>(&self, spec: &'a TableSpec) -> Vec<&'a str> {
        spec.columns
            .iter()
            .zip(&self.positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(c, _)| c.canonical)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::tables::{REQUESTS, USERS};

    fn headers(line: &str) -> Vec<String> {
        line.split(';').map(str::to_string).collect()
    }

    #[test]
    fn reconciles_case_and_whitespace_variants() {
        let map = USERS.reconcile(&headers(" UserID ;FIO;Phone;Login;Password;Role"));
        assert_eq!(
            map.positions,
            vec![Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
        assert!(map.missing(&USERS).is_empty());
    }

    #[test]
    fn legacy_request_headers_map_to_canonical_names() {
        let map = REQUESTS.reconcile(&headers(
            "requestID;startDate;homeTechType;homeTechModel;problemDescryption;requestStatus;completionDate;repairParts;masterID;clientID",
        ));
        // requestID is store-assigned and therefore not a required column
        assert_eq!(
            map.positions,
            (1..10usize).map(Some).collect::<Vec<_>>()
        );
        assert_eq!(map.width, 10);
    }

    #[test]
    fn absent_columns_are_reported_missing() {
        let map = USERS.reconcile(&headers("id;login;extra"));
        assert_eq!(map.missing(&USERS), vec!["fio", "phone", "password", "user_type"]);
        assert_eq!(map.positions[0], Some(0));
        assert_eq!(map.positions[3], Some(1));
    }

    #[test]
    fn first_duplicate_header_wins() {
        let map = USERS.reconcile(&headers("userid;id;login"));
        assert_eq!(map.positions[0], Some(0));
    }

    #[test]
    fn insert_sql_follows_policy() {
        assert_eq!(
            USERS.insert_sql(),
            "INSERT OR REPLACE INTO users (user_id, fio, phone, login, password, user_type) VALUES (?, ?, ?, ?, ?, ?)"
        );
        assert!(REQUESTS.insert_sql().starts_with("INSERT INTO requests (start_date, "));
    }
}
