/// Identifies the back-end DBMS of the target, as determined elsewhere
/// (fingerprinting is out of scope here; the engine only branches on this
/// tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbmsId {
    MySql,
    MsSql,
    Oracle,
    PgSql,
    Sybase,
}

impl DbmsId {
    pub const ALL: [DbmsId; 5] = [
        DbmsId::MySql,
        DbmsId::MsSql,
        DbmsId::Oracle,
        DbmsId::PgSql,
        DbmsId::Sybase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DbmsId::MySql => "MYSQL",
            DbmsId::MsSql => "MSSQL",
            DbmsId::Oracle => "ORACLE",
            DbmsId::PgSql => "PGSQL",
            DbmsId::Sybase => "SYBASE",
        }
    }
}
