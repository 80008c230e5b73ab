use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[arg(
        long = "server",
        value_name = "URL",
        help = "Address of the device backend, overrides the configuration files"
    )]
    pub server_address: Option<String>,

    #[arg(
        long = "open",
        value_name = "PATH",
        help = "Screen to open on start up, e.g. /auth/reset-password/<token>"
    )]
    pub open_path: Option<String>,
}
