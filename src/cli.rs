// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

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
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_parser(["week", "month"])
        .default_value("month")
        .help("Comparison period")
}

pub fn build_cli() -> Command {
    Command::new("smartfin")
        .about("Track expenses, compare periods and get budget commentary")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and remove transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["expense", "income"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("category").long("category").help("Category id or name"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(
                            Arg::new("yesterday")
                                .long("yesterday")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("date")
                                .help("Date the entry yesterday"),
                        )
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .value_parser(["cash", "bank", "momo"])
                                .default_value("cash"),
                        ),
                )
                .subcommand(
                    Command::new("quick")
                        .about("Describe a transaction in plain words and let the AI fill it in")
                        .arg(Arg::new("text").required(true).num_args(1..)),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("search").long("search").help("Match text in the note"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD, inclusive"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD, inclusive"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .action(ArgAction::Append)
                                .help("Category id or name; repeatable"),
                        )
                        .arg(Arg::new("min").long("min"))
                        .arg(Arg::new("max").long("max"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Funds available at the start of the month")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("cash").long("cash").default_value("0"))
                        .arg(Arg::new("bank").long("bank").default_value("0"))
                        .arg(Arg::new("ewallet").long("ewallet").default_value("0")),
                ),
        )
        .subcommand(json_flags(
            Command::new("stats").about("Today, month-to-date and remaining balance"),
        ))
        .subcommand(json_flags(
            Command::new("analysis")
                .about("Compare the current period with the previous one")
                .arg(mode_arg())
                .arg(
                    Arg::new("advice")
                        .long("advice")
                        .action(ArgAction::SetTrue)
                        .help("Ask the AI for a one-sentence forecast"),
                ),
        ))
        .subcommand(
            Command::new("report")
                .about("Spending charts as tables")
                .subcommand(json_flags(Command::new("by-category")))
                .subcommand(json_flags(
                    Command::new("daily").arg(
                        Arg::new("days")
                            .long("days")
                            .value_parser(value_parser!(u32).range(1..=366))
                            .default_value("7"),
                    ),
                ))
                .subcommand(json_flags(Command::new("calendar"))),
        )
        .subcommand(
            Command::new("category")
                .about("The fixed category table")
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(Arg::new("out").long("out").help("Default SmartFin_Backup_<date>.csv")),
            ),
        )
}
