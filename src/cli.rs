// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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
            .conflicts_with("json")
            .help("Print one JSON value per line"),
    )
}

fn year_arg(required: bool) -> Arg {
    let a = Arg::new("year").long("year").value_name("YYYY");
    if required {
        a.required(true)
    } else {
        a.help("Defaults to the current year")
    }
}

fn month_arg(required: bool) -> Arg {
    let a = Arg::new("month").long("month").value_name("1-12");
    if required {
        a.required(true)
    } else {
        a.help("Defaults to the current month")
    }
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn text_arg(id: &'static str, long: &'static str) -> Arg {
    Arg::new(id).long(long)
}

pub fn build_cli() -> Command {
    Command::new("creatorledger")
        .about("Revenue, expense and content-productivity ledger for creators")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("CREATORLEDGER_DB")
                .value_name("PATH")
                .help("SQLite ledger file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log verbosity (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the ledger database"))
        .subcommand(
            Command::new("config")
                .about("Ledger settings")
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("key")
                                .long("key")
                                .required(true)
                                .value_parser(["endpoint", "spreadsheet_id"]),
                        )
                        .arg(Arg::new("value").long("value").required(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("platform")
                .about("Platform catalog")
                .subcommand(Command::new("add").arg(text_arg("name", "name").required(true)))
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(text_arg("name", "name").required(true))),
        )
        .subcommand(
            Command::new("channel")
                .about("Channels and brands")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("platform", "platform").required(true))
                        .arg(text_arg("name", "name").required(true))
                        .arg(text_arg("brand", "brand").required(true))
                        .arg(text_arg("color", "color"))
                        .arg(text_arg("credentials", "credentials")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(text_arg("platform", "platform")),
                ))
                .subcommand(
                    Command::new("rm")
                        .arg(text_arg("platform", "platform").required(true))
                        .arg(text_arg("name", "name").required(true)),
                )
                .subcommand(json_args(Command::new("brands"))),
        )
        .subcommand(
            Command::new("revenue")
                .about("Revenue ledger")
                .subcommand(
                    Command::new("set")
                        .about("Set one platform/channel/month cell; 0 clears it")
                        .arg(year_arg(true))
                        .arg(month_arg(true))
                        .arg(text_arg("platform", "platform").required(true))
                        .arg(text_arg("channel", "channel"))
                        .arg(text_arg("amount", "amount").required(true)),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(year_arg(false))
                        .arg(Arg::new("month").long("month"))
                        .arg(text_arg("platform", "platform")),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("expense")
                .about("Expense ledger")
                .subcommand(
                    Command::new("add")
                        .arg(
                            text_arg("date", "date")
                                .help("YYYY-MM-DD; defaults to today")
                                .conflicts_with_all(["year", "month"]),
                        )
                        .arg(Arg::new("year").long("year").requires("month"))
                        .arg(Arg::new("month").long("month").requires("year"))
                        .arg(text_arg("category", "category").required(true))
                        .arg(text_arg("name", "name"))
                        .arg(
                            Arg::new("quantity")
                                .long("quantity")
                                .value_parser(value_parser!(i64).range(1..))
                                .default_value("1"),
                        )
                        .arg(text_arg("unit_price", "unit-price").required(true))
                        .arg(text_arg("memo", "memo")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(year_arg(false))
                        .arg(Arg::new("month").long("month"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(json_args(Command::new("table").arg(year_arg(false)))),
        )
        .subcommand(
            Command::new("content")
                .about("Content pipeline")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("brand", "brand").required(true))
                        .arg(text_arg("main_platform", "main-platform").required(true))
                        .arg(
                            text_arg("distribute", "distribute")
                                .help("Comma separated distribution platforms"),
                        )
                        .arg(text_arg("status", "status").default_value("planning"))
                        .arg(year_arg(false))
                        .arg(month_arg(false))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(text_arg("title", "title"))
                        .arg(text_arg("topic", "topic"))
                        .arg(text_arg("editor", "editor"))
                        .arg(text_arg("memo", "memo")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(Arg::new("year").long("year"))
                        .arg(text_arg("status", "status")),
                ))
                .subcommand(
                    Command::new("status")
                        .arg(id_arg())
                        .arg(text_arg("status", "status").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("freelancer")
                .about("Editors and other freelancers")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("name", "name").required(true))
                        .arg(text_arg("contact", "contact"))
                        .arg(text_arg("channel", "channel"))
                        .arg(
                            Arg::new("weekly")
                                .long("weekly")
                                .value_parser(value_parser!(i64).range(0..))
                                .default_value("0"),
                        )
                        .arg(
                            Arg::new("completed")
                                .long("completed")
                                .value_parser(value_parser!(i64).range(0..))
                                .default_value("0"),
                        )
                        .arg(text_arg("price", "price").default_value("0"))
                        .arg(text_arg("program", "program"))
                        .arg(text_arg("memo", "memo")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated reports")
                .subcommand(json_args(Command::new("yearly").arg(year_arg(false))))
                .subcommand(json_args(
                    Command::new("monthly")
                        .arg(year_arg(false))
                        .arg(month_arg(false)),
                ))
                .subcommand(json_args(
                    Command::new("productivity").arg(year_arg(false)),
                ))
                .subcommand(json_args(Command::new("matrix").arg(year_arg(false))))
                .subcommand(json_args(Command::new("platforms").arg(year_arg(false))))
                .subcommand(json_args(
                    Command::new("dashboard")
                        .arg(year_arg(false))
                        .arg(month_arg(false)),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import records from CSV")
                .subcommand(Command::new("revenues").arg(text_arg("path", "path").required(true)))
                .subcommand(Command::new("expenses").arg(text_arg("path", "path").required(true)))
                .subcommand(Command::new("contents").arg(text_arg("path", "path").required(true))),
        )
        .subcommand(
            Command::new("export")
                .about("Export records")
                .subcommand(export_cmd("revenues"))
                .subcommand(export_cmd("expenses")),
        )
        .subcommand(
            Command::new("sync")
                .about("Exchange records with the remote ledger")
                .subcommand(
                    Command::new("pull")
                        .about("Replace a year of local revenues/expenses with the remote copy")
                        .arg(year_arg(false)),
                )
                .subcommand(
                    Command::new("push")
                        .about("Save a year of local records, plus channels and freelancers, to the remote ledger")
                        .arg(year_arg(false)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a record locally and in the remote ledger")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["revenue", "expense", "channel", "content", "freelancer"]),
                        )
                        .arg(id_arg()),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for data-quality issues"))
}

fn export_cmd(name: &'static str) -> Command {
    Command::new(name)
        .arg(
            Arg::new("format")
                .long("format")
                .required(true)
                .help("csv|json"),
        )
        .arg(Arg::new("out").long("out").required(true))
        .arg(Arg::new("year").long("year"))
}
