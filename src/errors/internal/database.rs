use thiserror::Error;

/// Failures talking to the relational store
///
/// Never shown to API clients; they see a generic 500.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {source}")]
    Connect {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Applying migrations failed: {source}")]
    Migrate {
        #[source]
        source: sea_orm::DbErr,
    },

    /// A single store query; `operation` names the store function
    #[error("Query {operation} failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Could not begin transaction: {source}")]
    TransactionBegin {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Could not commit transaction: {source}")]
    TransactionCommit {
        #[source]
        source: sea_orm::DbErr,
    },
}
