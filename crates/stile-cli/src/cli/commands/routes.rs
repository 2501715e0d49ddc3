//! Route listing command.

use anyhow::Result;
use stile_core::routing::{Access, RouteTable};

pub fn run() -> Result<()> {
    let table = RouteTable::builtin();

    for route in table.routes() {
        let access = match route.access {
            Access::Public => "public",
            Access::Protected => "protected",
        };
        println!("{:<40} {access:<10} {}", route.path, route.name);
    }

    Ok(())
}
