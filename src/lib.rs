// Library root
// -----------
// The binary (`main.rs`) only loads configuration and calls `ui::main_menu`;
// everything else lives here so it can be tested without a terminal.
//
// Module responsibilities:
// - `model`: the Product type and its validated construction.
// - `store`: the `RecordStore` trait with CSV, REST and in-memory backends.
// - `ops`: pure collection edits (next id, create, update, destroy).
// - `handlers` / `dispatch`: one handler per operation and the router.
// - `prompt` / `ui`: terminal input and the menu.
// - `config` / `logging`: environment configuration and tracing setup.
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod ops;
pub mod prompt;
pub mod store;
pub mod ui;
