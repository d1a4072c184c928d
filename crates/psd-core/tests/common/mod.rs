pub mod run_server;
