#![forbid(unsafe_code)]

use anyhow::Result;

use agent_os::cli::router;
use agent_os::commands;

fn main() -> Result<()> {
    let mode = router::route_args(std::env::args_os());
    commands::setup::execute(&mode)?;
    Ok(())
}
