//! Minimal survey example: decode an id64, then find the next star and boxel.

use std::error::Error;

use boxel::{KnownIndexSet, Navigator, SectorCoord, SectorTable, decode};

fn main() -> Result<(), Box<dyn Error>> {
    // snips-start: example
    let sectors = SectorTable::from_entries([(SectorCoord::new(39, 32, 18), "Col 285")]);
    let nav: Navigator<'_> = Navigator::new(&sectors);

    let id64 = 10_477_373_803;
    let addr = decode(id64);
    println!("{} is boxel {} of sector {}", sectors.resolve_name(&addr), addr.boxel, addr.sector);

    let position = nav.current_position(&addr)?;
    println!("Boxel {} of {}", position.h, position.max_h);

    let known: KnownIndexSet = [0, 1, 3].into_iter().collect();
    println!("Next star: {}", nav.next_uncatalogued_index(id64, &known)?);

    match nav.boxel_at_offset(id64, 1)? {
        Some(name) => println!("Next boxel: {name}"),
        None => println!("Last boxel in this layer"),
    }
    // snips-end: example

    Ok(())
}
