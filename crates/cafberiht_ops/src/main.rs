use cafberiht_ops::{accumulate, CoreCafberiht, CAFBERIHT_WIDTH};

use anyhow::Result;

use std::io::Write;

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{:?}", e);
        std::process::exit(1)
    }
}

fn try_main() -> Result<()> {
    let mut cafberiht = CoreCafberiht::default();
    let accumulator = accumulate(&mut cafberiht);

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "Final Value: {}, For Cafberiht Width of: {}",
        accumulator.value(),
        CAFBERIHT_WIDTH
    )?;
    Ok(())
}
