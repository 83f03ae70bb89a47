pub mod flash_storage;
