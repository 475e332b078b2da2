pub mod config;
pub mod files;
pub mod records;

pub use config::{load_config, save_config, ReminderConfig};
pub use files::{
    atomic_write, config_file, ensure_data_dir, get_data_dir, init_local_dir, logs_dir, read_file,
    records_file,
};
pub use records::{parse_records, serialize_records};
