// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
        .help("Record id")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .value_name("DATE")
            .help("Inclusive start date (YYYY-MM-DD)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("DATE")
            .help("Inclusive end date (YYYY-MM-DD)"),
    )
}

fn income_cmd() -> Command {
    Command::new("income")
        .about("Record and review income")
        .subcommand(
            Command::new("add")
                .about("Add an income entry")
                .arg(Arg::new("date").long("date").required(true).value_name("DATE"))
                .arg(Arg::new("source").long("source").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("notes").long("notes"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue)
                        .help("Mark as repeating"),
                ),
        )
        .subcommand(json_flags(range_args(
            Command::new("list").about("List income entries"),
        )))
        .subcommand(
            Command::new("edit")
                .about("Update fields of an income entry")
                .arg(id_arg())
                .arg(Arg::new("date").long("date").value_name("DATE"))
                .arg(Arg::new("source").long("source"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("notes").long("notes"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_name("BOOL")
                        .value_parser(clap::value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("rm").about("Delete an income entry").arg(id_arg()))
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Record and review expenses")
        .subcommand(
            Command::new("add")
                .about("Add an expense entry")
                .arg(Arg::new("date").long("date").required(true).value_name("DATE"))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("deductible")
                        .long("deductible")
                        .action(ArgAction::SetTrue)
                        .help("Mark as tax deductible"),
                )
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue)
                        .help("Mark as repeating"),
                ),
        )
        .subcommand(json_flags(range_args(
            Command::new("list")
                .about("List expense entries")
                .arg(Arg::new("category").long("category").help("Only this category")),
        )))
        .subcommand(
            Command::new("edit")
                .about("Update fields of an expense entry")
                .arg(id_arg())
                .arg(Arg::new("date").long("date").value_name("DATE"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("deductible")
                        .long("deductible")
                        .value_name("BOOL")
                        .value_parser(clap::value_parser!(bool)),
                )
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_name("BOOL")
                        .value_parser(clap::value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("rm").about("Delete an expense entry").arg(id_arg()))
        .subcommand(
            Command::new("receipt")
                .about("Manage receipt files attached to an expense")
                .subcommand(
                    Command::new("attach")
                        .about("Copy a file into the receipts directory and attach it")
                        .arg(id_arg())
                        .arg(Arg::new("file").required(true).value_name("FILE")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Detach a receipt path from an expense")
                        .arg(id_arg())
                        .arg(Arg::new("path").required(true).value_name("PATH"))
                        .arg(
                            Arg::new("delete-file")
                                .long("delete-file")
                                .action(ArgAction::SetTrue)
                                .help("Also delete the copied file (best effort)"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List receipts attached to an expense")
                        .arg(id_arg()),
                ),
        )
}

fn debt_cmd() -> Command {
    Command::new("debt")
        .about("Track outstanding debts")
        .subcommand(
            Command::new("add")
                .about("Add a debt")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("type").long("type").required(true).value_name("KIND"))
                .arg(Arg::new("original").long("original").required(true).value_name("AMOUNT"))
                .arg(Arg::new("current").long("current").required(true).value_name("AMOUNT"))
                .arg(Arg::new("rate").long("rate").required(true).value_name("PCT"))
                .arg(
                    Arg::new("min-payment")
                        .long("min-payment")
                        .required(true)
                        .value_name("AMOUNT"),
                )
                .arg(Arg::new("due").long("due").required(true).value_name("DATE"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_flags(Command::new("list").about("List debts")))
        .subcommand(
            Command::new("edit")
                .about("Update fields of a debt")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("type").long("type").value_name("KIND"))
                .arg(Arg::new("original").long("original").value_name("AMOUNT"))
                .arg(Arg::new("current").long("current").value_name("AMOUNT"))
                .arg(Arg::new("rate").long("rate").value_name("PCT"))
                .arg(Arg::new("min-payment").long("min-payment").value_name("AMOUNT"))
                .arg(Arg::new("due").long("due").value_name("DATE"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("rm").about("Delete a debt").arg(id_arg()))
}

fn asset_cmd() -> Command {
    Command::new("asset")
        .about("Track owned assets")
        .subcommand(
            Command::new("add")
                .about("Add an asset")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("type").long("type").required(true).value_name("KIND"))
                .arg(Arg::new("value").long("value").required(true).value_name("AMOUNT"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("DATE")
                        .help("Valuation date, defaults to today"),
                )
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_flags(Command::new("list").about("List assets")))
        .subcommand(
            Command::new("edit")
                .about("Update fields of an asset")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("type").long("type").value_name("KIND"))
                .arg(Arg::new("value").long("value").value_name("AMOUNT"))
                .arg(Arg::new("date").long("date").value_name("DATE"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("rm").about("Delete an asset").arg(id_arg()))
}

fn investment_cmd() -> Command {
    Command::new("investment")
        .about("Track investment positions")
        .subcommand(
            Command::new("add")
                .about("Add an investment")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("type").long("type").required(true).value_name("KIND"))
                .arg(Arg::new("quantity").long("quantity").required(true).value_name("QTY"))
                .arg(
                    Arg::new("purchase-price")
                        .long("purchase-price")
                        .required(true)
                        .value_name("AMOUNT"),
                )
                .arg(
                    Arg::new("current-price")
                        .long("current-price")
                        .required(true)
                        .value_name("AMOUNT"),
                )
                .arg(
                    Arg::new("purchased")
                        .long("purchased")
                        .required(true)
                        .value_name("DATE"),
                )
                .arg(
                    Arg::new("updated")
                        .long("updated")
                        .value_name("DATE")
                        .help("Last price update, defaults to today"),
                )
                .arg(
                    Arg::new("asset")
                        .long("asset")
                        .value_name("ASSET_ID")
                        .value_parser(clap::value_parser!(i64))
                        .help("Link to an asset record (not validated)"),
                )
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_flags(Command::new("list").about("List investments")))
        .subcommand(
            Command::new("edit")
                .about("Update fields of an investment")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("type").long("type").value_name("KIND"))
                .arg(Arg::new("quantity").long("quantity").value_name("QTY"))
                .arg(Arg::new("purchase-price").long("purchase-price").value_name("AMOUNT"))
                .arg(Arg::new("current-price").long("current-price").value_name("AMOUNT"))
                .arg(Arg::new("purchased").long("purchased").value_name("DATE"))
                .arg(Arg::new("updated").long("updated").value_name("DATE"))
                .arg(
                    Arg::new("asset")
                        .long("asset")
                        .value_name("ASSET_ID")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("rm").about("Delete an investment").arg(id_arg()))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated views over the recorded data")
        .subcommand(json_flags(
            Command::new("net-worth").about("Assets minus debts, as of now"),
        ))
        .subcommand(json_flags(range_args(
            Command::new("cashflow").about("Income and spending totals per date"),
        )))
        .subcommand(json_flags(range_args(
            Command::new("spend-by-category").about("Spending totals per category"),
        )))
        .subcommand(json_flags(range_args(
            Command::new("deductible").about("Tax-deductible expenses and their total"),
        )))
        .subcommand(json_flags(
            Command::new("projection")
                .about("Rolling 12-month net-worth projection from the trailing year"),
        ))
}

fn calc_cmd() -> Command {
    Command::new("calc")
        .about("Standalone financial calculators")
        .subcommand(json_flags(
            Command::new("mortgage")
                .about("Fixed-rate monthly mortgage payment")
                .arg(
                    Arg::new("principal")
                        .long("principal")
                        .required(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .value_name("PCT")
                        .help("Annual interest rate in percent"),
                )
                .arg(
                    Arg::new("years")
                        .long("years")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("refinance")
                .about("Compare the current mortgage against a refinance")
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .help("Current loan balance"),
                )
                .arg(
                    Arg::new("original-term")
                        .long("original-term")
                        .required(true)
                        .value_parser(clap::value_parser!(u32))
                        .value_name("YEARS"),
                )
                .arg(
                    Arg::new("original-rate")
                        .long("original-rate")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .value_name("PCT"),
                )
                .arg(
                    Arg::new("new-rate")
                        .long("new-rate")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .value_name("PCT"),
                )
                .arg(
                    Arg::new("new-term")
                        .long("new-term")
                        .required(true)
                        .value_parser(clap::value_parser!(u32))
                        .value_name("YEARS"),
                )
                .arg(
                    Arg::new("costs")
                        .long("costs")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .help("Closing costs of the refinance"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("ira")
                .about("Project an IRA balance at retirement")
                .arg(
                    Arg::new("age")
                        .long("age")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("retirement-age")
                        .long("retirement-age")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .required(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("contribution")
                        .long("contribution")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .value_name("ANNUAL"),
                )
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .value_name("PCT"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("retirement")
                .about("Retirement projection with inflation and a rate sweep")
                .arg(
                    Arg::new("age")
                        .long("age")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("retirement-age")
                        .long("retirement-age")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .required(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("contribution")
                        .long("contribution")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .value_name("ANNUAL"),
                )
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .value_parser(clap::value_parser!(f64))
                        .value_name("PCT"),
                )
                .arg(
                    Arg::new("inflation")
                        .long("inflation")
                        .value_parser(clap::value_parser!(f64))
                        .value_name("PCT")
                        .default_value("3"),
                ),
        ))
}

fn export_cmd() -> Command {
    range_args(
        Command::new("export")
            .about("Export records to CSV or JSON")
            .arg(
                Arg::new("collection")
                    .required(true)
                    .value_parser([
                        "income",
                        "expenses",
                        "debts",
                        "assets",
                        "investments",
                        "all",
                    ]),
            )
            .arg(
                Arg::new("format")
                    .long("format")
                    .required(true)
                    .value_name("FMT")
                    .help("csv or json"),
            )
            .arg(Arg::new("out").long("out").required(true).value_name("FILE")),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneymind")
        .about("Personal finances in one JSON file: records, reports, and calculators")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the data file and print its location"))
        .subcommand(income_cmd())
        .subcommand(expense_cmd())
        .subcommand(debt_cmd())
        .subcommand(asset_cmd())
        .subcommand(investment_cmd())
        .subcommand(report_cmd())
        .subcommand(calc_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Scan the store for inconsistencies"))
}
