// Utilities
// Key and prime-table files

pub mod file_ops;

pub use file_ops::{load_keys, read_prime_table, save_keys, PrivateRecord, PublicRecord};
