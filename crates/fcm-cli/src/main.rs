use fcm_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);

    if let Err(err) = cli.run().await {
        eprintln!("fcm error: {:#}", err);
        std::process::exit(1);
    }
}
