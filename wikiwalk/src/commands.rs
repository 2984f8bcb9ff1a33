use crate::CLAP_STYLING;
use clap::arg;
use wikiwalk_scanner::config::DEFAULT_BASE_URL;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("wikiwalk")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wikiwalk")
        .styles(CLAP_STYLING)
        .about(
            "Crawl a wiki outward from a topic, expanding the most relevant links of each \
            page, and print the resulting topic tree.",
        )
        .arg(arg!(<TOPIC>).help("The topic of the starting wiki page"))
        .arg(arg!(<DISTANCE>).help("How many times links should be expanded"))
        .arg(arg!(<BRANCHING>).help("The number of links to expand per page"))
        .arg(
            arg!([BASE_URL])
                .help("URL of the wiki site")
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("Concurrent page fetches within one level of the crawl")
                .value_parser(clap::value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json, markdown")
                .value_parser(["text", "json", "markdown", "md"])
                .default_value("text"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save report to file (default: print to stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(arg!(-q --"quiet" "Suppress progress output").required(false))
}
