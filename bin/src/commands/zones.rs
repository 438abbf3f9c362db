//! Zones command implementation.

use spotpris_lib::prelude::*;

/// Print the price zones and the area codes they are published under.
pub(crate) fn list_zones() {
    println!("{:<6} {:<18}", "ZONE", "AREA CODE");
    println!("{}", "-".repeat(25));

    for zone in Zone::all() {
        println!("{:<6} {:<18}", zone.as_str(), zone.domain());
    }
}
