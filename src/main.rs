// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneymind::{cli, commands, store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = store::Store::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data file at {}", store.path().display());
        }
        Some(("income", sub)) => commands::income::handle(&mut store, sub)?,
        Some(("expense", sub)) => commands::expense::handle(&mut store, sub)?,
        Some(("debt", sub)) => commands::debt::handle(&mut store, sub)?,
        Some(("asset", sub)) => commands::asset::handle(&mut store, sub)?,
        Some(("investment", sub)) => commands::investment::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::report::handle(&store, sub)?,
        Some(("calc", sub)) => commands::calc::handle(sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
