//! Synonym tables for the three input datasets.
//!
//! New header spellings go here; the importer itself never branches on names.

use super::columns::{ColumnKind, ColumnSpec, TableSpec, WritePolicy};

const fn col(
    canonical: &'static str,
    synonyms: &'static [&'static str],
    kind: ColumnKind,
) -> ColumnSpec {
    ColumnSpec {
        canonical,
        synonyms,
        kind,
    }
}

pub const USERS: TableSpec = TableSpec {
    table: "users",
    policy: WritePolicy::Upsert,
    columns: &[
        col("user_id", &["userid", "id"], ColumnKind::Key),
        col("fio", &[], ColumnKind::Text),
        col("phone", &[], ColumnKind::Text),
        col("login", &[], ColumnKind::Text),
        col("password", &[], ColumnKind::Text),
        col("user_type", &["type", "role"], ColumnKind::Text),
    ],
};

pub const REQUESTS: TableSpec = TableSpec {
    table: "requests",
    policy: WritePolicy::Append,
    columns: &[
        col("start_date", &["startdate"], ColumnKind::Text),
        col(
            "climate_tech_type",
            &["hometechtype", "climatetechtype"],
            ColumnKind::Text,
        ),
        col(
            "climate_tech_model",
            &["hometechmodel", "climatetechmodel"],
            ColumnKind::Text,
        ),
        col(
            "problem_description",
            &["problemdescryption", "problemdescription"],
            ColumnKind::Text,
        ),
        col("request_status", &["requeststatus"], ColumnKind::Text),
        col("completion_date", &["completiondate"], ColumnKind::Text),
        col("repair_parts", &["repairparts"], ColumnKind::Text),
        col("master_id", &["masterid"], ColumnKind::Integer),
        col("client_id", &["clientid"], ColumnKind::Integer),
    ],
};

pub const COMMENTS: TableSpec = TableSpec {
    table: "comments",
    policy: WritePolicy::Append,
    columns: &[
        col("message", &[], ColumnKind::Text),
        col("master_id", &["masterid"], ColumnKind::Integer),
        col("request_id", &["requestid"], ColumnKind::Integer),
    ],
};
