// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the deposit flow.
//
// Module responsibilities:
// - `config`: Resolves the access token and endpoint URLs from the
//   environment once, so the request code never reads them implicitly.
// - `api`: Encapsulates HTTP interactions with the deposition service
//   (bucket upload, deposition creation).
// - `ui`: Implements the terminal flow and delegates requests to `api`.
//
// Keeping this separation makes it easy to test the API logic against a
// local mock server without touching the process environment.
pub mod api;
pub mod config;
pub mod ui;
