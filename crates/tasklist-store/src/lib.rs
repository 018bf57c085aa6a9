pub mod datastore;
pub mod record;

pub use datastore::DataStore;
pub use record::TaskRecord;
