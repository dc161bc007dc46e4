use cafberiht_ops::{
    cli::Args,
    layout,
    mixin::KernelTick,
    telemetry, CoreCafberiht, CAFBERIHT_WIDTH,
};

use anyhow::{Context, Result};
use cafberiht::Cafberiht;
use tracing::{debug, info};

use std::io::Write;

fn main() {
    let args = Args::from_cli();
    if let Err(e) = try_main(&args) {
        eprintln!("{:?}", e);
        std::process::exit(1)
    }
}

fn try_main(args: &Args) -> Result<()> {
    telemetry::init(args.verbose).context("Failed to set up logging")?;
    info!(width = CAFBERIHT_WIDTH, "inspecting CoreCafberiht");

    let mut stdout = std::io::stdout().lock();

    if let Some(name) = &args.enumerator {
        let position = layout::locate::<CoreCafberiht>(name)
            .with_context(|| format!("Failed to look up `{}`", name))?;
        match position {
            Some(position) => writeln!(stdout, "{}", position)?,
            None => writeln!(stdout, "absent")?,
        }
        return Ok(());
    }

    let mut cafberiht = CoreCafberiht::default();
    for _ in 0..args.ticks {
        cafberiht.walk::<KernelTick, _>(&mut ());
    }
    debug!(ticks = args.ticks, "ran kernel ticks");

    let mut rows = layout::collect(&cafberiht);
    if args.admitted_only {
        rows.retain(|row| row.admitted);
    }
    layout::render(&rows, args.format.into(), &mut stdout).context("Failed to render the layout")?;

    Ok(())
}
