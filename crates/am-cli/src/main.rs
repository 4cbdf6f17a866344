//! assignment-maker - Assignment authoring CLI
//!
//! Builds structured assignments and exports them as submission bundles.
//!
//! ## Quick Start
//!
//! ```bash
//! # Add the built-in example
//! assignment-maker example
//!
//! # See what is stored
//! assignment-maker list
//!
//! # Export the bundle for an assignment
//! assignment-maker export <ID>
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
