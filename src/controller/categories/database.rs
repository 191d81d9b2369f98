//! Postgres configuration (`/config/database/postgres`).

use super::Category;
use crate::model::{settings_document, ConfigCategory};

settings_document! {
    /// Tunable Postgres parameters
    pub struct DatabaseSettings {
        effective_cache_size as "effective_cache_size": String,
        logical_decoding_work_mem as "logical_decoding_work_mem": String,
        maintenance_work_mem as "maintenance_work_mem": String,
        max_connections as "max_connections": i64,
        max_locks_per_transaction as "max_locks_per_transaction": i64,
        max_parallel_maintenance_workers as "max_parallel_maintenance_workers": i64,
        max_parallel_workers as "max_parallel_workers": i64,
        max_parallel_workers_per_gather as "max_parallel_workers_per_gather": i64,
        max_replication_slots as "max_replication_slots": i64,
        max_slot_wal_keep_size as "max_slot_wal_keep_size": String,
        max_standby_archive_delay as "max_standby_archive_delay": String,
        max_standby_streaming_delay as "max_standby_streaming_delay": String,
        max_wal_size as "max_wal_size": String,
        max_wal_senders as "max_wal_senders": i64,
        max_worker_processes as "max_worker_processes": i64,
        session_replication_role as "session_replication_role": String,
        shared_buffers as "shared_buffers": String,
        statement_timeout as "statement_timeout": String,
        track_activity_query_size as "track_activity_query_size": String,
        track_commit_timestamp as "track_commit_timestamp": bool,
        wal_keep_size as "wal_keep_size": String,
        wal_sender_timeout as "wal_sender_timeout": String,
        work_mem as "work_mem": String,
    }
}

#[derive(Debug)]
pub struct DatabaseCategory;

impl Category for DatabaseCategory {
    const KIND: ConfigCategory = ConfigCategory::Database;
    type Document = DatabaseSettings;
}
