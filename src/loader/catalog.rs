//! PostgreSQL catalog loader
//!
//! Reads every live, valid index of one namespace with its usage statistics,
//! then resolves the attribute names of each index. Column names for all
//! indexed tables are fetched in a single round trip.

use postgres::{Client, Config, NoTls, Row};

use crate::catalog::{Bytes, Index, Oid};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::attrs::{resolve_attrs, ColumnsByTable};
use super::errors::LoaderResult;

// Vectors are cast to arrays so they decode as plain Rust vectors.
const SQL_SELECT_INDEX_INFO: &str = "
select c.oid,
       c.relname,
       c.relnamespace,
       ns.nspname,
       i.indrelid,
       t.relname,
       i.indnatts::int4,
       i.indisunique,
       i.indisprimary,
       i.indisvalid,
       i.indislive,
       i.indkey::int2[],
       i.indcollation::oid[],
       i.indclass::oid[],
       i.indoption::int2[],
       coalesce(pg_get_expr(i.indexprs, i.indrelid), ''),
       coalesce(pg_get_expr(i.indpred, i.indrelid), ''),
       t.relpages::int8,
       t.reltuples::int8,
       c.relpages::int8,
       c.reltuples::int8,
       coalesce(s.idx_scan, 0),
       coalesce(s.idx_tup_read, 0),
       coalesce(s.idx_tup_fetch, 0),
       pg_relation_size(c.oid),
       (select indexdef
          from pg_indexes
         where schemaname = ns.nspname
           and tablename = t.relname
           and indexname = c.relname)
  from pg_index i
  join pg_class c on c.oid = i.indexrelid
  join pg_class t on t.oid = i.indrelid
  join pg_namespace ns on ns.oid = c.relnamespace
  left outer join pg_stat_user_indexes s on s.indexrelid = i.indexrelid
 where i.indislive is true and i.indisvalid is true
   and ns.nspname = $1
 order by c.oid";

// Columns of every table that has at least one live, valid index.
const SQL_SELECT_INDEX_TABLE_COLUMNS: &str = "
select c.oid, a.attname, a.attnum
  from pg_class c
  join pg_attribute a on a.attrelid = c.oid
 where c.oid in (select indrelid from pg_index where indislive is true and indisvalid is true)
   and a.attnum >= 1";

/// Loads index descriptors from a live PostgreSQL database
pub struct CatalogLoader {
    client: Client,
    namespace: String,
}

impl CatalogLoader {
    /// Wraps an established connection
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    /// Connects using a parsed connection config
    pub fn connect(config: &Config, namespace: impl Into<String>) -> LoaderResult<Self> {
        let client = config.connect(NoTls)?;
        log_event_with_fields(
            Event::Connected,
            &[
                ("dbname", config.get_dbname().unwrap_or("")),
                ("user", config.get_user().unwrap_or("")),
            ],
        );
        Ok(Self::new(client, namespace))
    }

    /// Returns the namespace being analyzed
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns all live, valid indexes in the namespace, ordered by oid.
    pub fn load_indexes(&mut self) -> LoaderResult<Vec<Index>> {
        let rows = self
            .client
            .query(SQL_SELECT_INDEX_INFO, &[&self.namespace])?;
        let mut indexes: Vec<Index> = rows.iter().map(index_from_row).collect::<Result<_, _>>()?;

        let columns = self.load_table_columns()?;
        for index in &mut indexes {
            index.attrs = resolve_attrs(index, &columns)?;
        }

        let count = indexes.len().to_string();
        log_event_with_fields(
            Event::CatalogLoaded,
            &[("indexes", count.as_str()), ("namespace", self.namespace.as_str())],
        );
        Ok(indexes)
    }

    /// Closes the connection
    pub fn close(self) -> LoaderResult<()> {
        self.client.close()?;
        Ok(())
    }

    fn load_table_columns(&mut self) -> LoaderResult<ColumnsByTable> {
        let rows = self.client.query(SQL_SELECT_INDEX_TABLE_COLUMNS, &[])?;
        let mut columns = ColumnsByTable::new();
        for row in &rows {
            let table: u32 = row.try_get(0)?;
            let name: String = row.try_get(1)?;
            let key: i16 = row.try_get(2)?;
            columns.entry(Oid(table)).or_default().add(key, name);
        }
        let tables = columns.len().to_string();
        Logger::trace("TABLE_COLUMNS_LOADED", &[("tables", tables.as_str())]);
        Ok(columns)
    }
}

fn oids(values: Vec<u32>) -> Vec<Oid> {
    values.into_iter().map(Oid).collect()
}

fn index_from_row(row: &Row) -> Result<Index, postgres::Error> {
    let num_columns: i32 = row.try_get(6)?;
    Ok(Index {
        oid: Oid(row.try_get(0)?),
        name: row.try_get(1)?,
        namespace_oid: Oid(row.try_get(2)?),
        namespace: row.try_get(3)?,
        table_oid: Oid(row.try_get(4)?),
        table_name: row.try_get(5)?,
        num_columns: usize::try_from(num_columns).unwrap_or(0),
        is_unique: row.try_get(7)?,
        is_primary: row.try_get(8)?,
        is_valid: row.try_get(9)?,
        is_live: row.try_get(10)?,
        keys: row.try_get(11)?,
        collations: oids(row.try_get(12)?),
        classes: oids(row.try_get(13)?),
        options: row.try_get(14)?,
        exprs: row.try_get(15)?,
        pred: row.try_get(16)?,
        num_table_pages: row.try_get(17)?,
        num_table_rows: row.try_get(18)?,
        num_pages: row.try_get(19)?,
        num_rows: row.try_get(20)?,
        num_scans: row.try_get(21)?,
        num_tuples_read: row.try_get(22)?,
        num_tuples_fetched: row.try_get(23)?,
        size: Bytes(row.try_get(24)?),
        definition: row.try_get(25)?,
        attrs: Vec::new(),
    })
}
