use std::process::ExitCode;

fn main() -> ExitCode {
    policydesk_cli::run()
}
