// Library root
// -----------
// Terminal client for the Vintage Cars database. The binary (`main.rs`)
// wires these modules together into the interactive menu.
//
// Module responsibilities:
// - `config`: command line flags and the validated client configuration.
// - `model`: the car record and its wire format.
// - `validate`: pure field rules (id, names, production year, convertible).
// - `prompt`: answer sources, operator output and the bounded retry loop.
// - `api`: blocking HTTP calls against the cars resource.
// - `table`: fixed-width rendering of the listing.
// - `ui`: the menu loop and the list/add/delete/update flows.
pub mod api;
pub mod config;
pub mod model;
pub mod prompt;
pub mod table;
pub mod ui;
pub mod validate;
