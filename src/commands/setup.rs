use crate::bootstrap::{BashRunner, BootstrapPaths, Bootstrapper, HttpScriptSource};
use crate::cli::router::BootstrapMode;
use crate::config::Config;
use crate::error::Result;
use std::time::Duration;

/// Run the bootstrapper in the given mode against the configured script URL
pub fn execute(mode: &BootstrapMode) -> Result<()> {
    let config = Config::load_global()?;
    let paths = BootstrapPaths::detect()?;

    let timeout = config.bootstrap.timeout_secs.map(Duration::from_secs);
    let source = HttpScriptSource::new(timeout)?;

    let bootstrapper = Bootstrapper::new(
        source,
        BashRunner::new(),
        paths,
        config.bootstrap.base_script_url(),
    );

    bootstrapper.run(mode)
}
