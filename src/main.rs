use clap::Parser;
use gitview_app::Args;
use std::process::ExitCode;

/// Prints the GitHub profile analysis of one user.
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    match gitview_app::run(&args).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
