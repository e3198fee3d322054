//! prdtree - compile product requirement documents into task trees

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = prdtree::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
