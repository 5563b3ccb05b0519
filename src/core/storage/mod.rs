pub mod state_file;
