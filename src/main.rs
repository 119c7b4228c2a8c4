use colored::Colorize;

fn main() {
    if let Err(e) = query_filter::run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
