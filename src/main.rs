use clap::Parser;
use simple_logger::SimpleLogger;
use snowprobe::cli::{self, Args};
use snowprobe::report::Reporter;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    _ = SimpleLogger::new().with_level(args.log_level()).env().init();

    let mut reporter = Reporter::stdout();
    ExitCode::from(cli::run(&args, &mut reporter).await)
}
