use acrs::config::Config;
use acrs::output::{cgi_error_page, cgi_page, route_lines, summary_json};
use acrs::{logging, parse_route_list, summarize};
use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::io::Read;
use std::process::ExitCode;

/// Automatic classless route summarization
#[derive(Parser, Debug)]
#[command(
    name = "acrs",
    version,
    about = "Summarize IPv4 routes into the smallest equivalent list",
    after_help = "PREFIX is an IPv4 address and prefix length in CIDR form, e.g. 192.168.1.0/24.\n\
                  A metric of 0 is assumed unless 'm<NUMBER>' is appended: 192.168.1.0/24m1"
)]
struct Args {
    /// Routes to summarize
    #[arg(value_name = "PREFIX", required_unless_present = "cgi")]
    prefixes: Vec<String>,

    /// Log every summarization step to stderr
    #[arg(short = 'l', long = "log")]
    log: bool,

    /// Do not print metrics ("in 0")
    #[arg(short = 'm', long = "no-metric")]
    no_metric: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "no_metric")]
    json: bool,

    /// Run as a CGI program, reading the form from the request
    #[arg(long, conflicts_with_all = ["prefixes", "json"])]
    cgi: bool,
}

/// Form body of the current CGI request: stdin for POST, else the query string.
fn read_cgi_form() -> acrs::Result<String> {
    let method = std::env::var("REQUEST_METHOD").unwrap_or_default();
    if method.eq_ignore_ascii_case("POST") {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        Ok(std::env::var("QUERY_STRING").unwrap_or_default())
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();
    let (config, warnings) = Config::from_env();
    logging::init(&config.log_config, args.log)?;
    for warning in &warnings {
        log::warn!("{warning}");
    }
    log::debug!("#Start main() {:?}", args);

    if args.cgi {
        let page = match read_cgi_form() {
            Ok(form) => cgi_page(&form, config.max_web_routes),
            Err(e) => cgi_error_page(&e),
        };
        print!("{page}");
        return Ok(ExitCode::SUCCESS);
    }

    let routes = match parse_route_list(args.prefixes.as_slice()) {
        Ok(routes) => routes,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let summary = match summarize(&routes) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.json {
        println!("{}", summary_json(&summary)?);
    } else {
        for line in route_lines(&summary.routes, !args.no_metric) {
            println!("{line}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
