pub mod bootstrap;
pub mod connection;
pub mod migrations;
pub mod repositories;
pub mod storage;
pub mod user_data;

pub use bootstrap::{bootstrap, bootstrap_with_config, init_logging, BootstrapError, FitsizeApp};
pub use connection::{connect, connect_with_settings, DbPool};
pub use repositories::{
    InMemoryKeyValueRepository, KeyValueRepository, RepositoryError, SqlKeyValueRepository,
};
pub use storage::{DeviceStorage, StorageError, StorageOutcome};
pub use user_data::{StorageInfo, UserDataExport, UserDataStore};
