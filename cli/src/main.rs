use std::sync::Arc;

use commander_core::Dispatcher;
use tracing_subscriber::EnvFilter;

mod addition;

use addition::Addition;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let registry = match addition::registry(Arc::new(Addition::default())) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let dispatcher = Dispatcher::new(registry);

    if let Err(err) = dispatcher.execute(std::env::args().skip(1)) {
        if let Err(io_err) = dispatcher.print_failure(&err) {
            eprintln!("error: {io_err}");
        }
        if !err.is_help() {
            std::process::exit(1);
        }
    }
}
