#[macro_use]
mod logger;

mod access_log;
mod cli;
mod config;
mod error;
mod mount;
mod network;
mod prompt;
mod routes;
mod server;
mod shutdown;

use config::{ConfigLoader, ServeOptions};
use error::ServeError;
use mount::Target;
use network::NetworkUtils;
use prompt::MountPrompter;
use routes::RouteTable;
use server::ServerRunner;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("serve=info"));

    let matches =
        cli::build_cli().get_matches_from(cli::normalize_single_dash_flags(env::args_os()));
    let (overrides, custom_config) = cli::overrides_from_matches(&matches);
    let has_cli_items = !overrides.items.is_empty();

    let config_loader = ConfigLoader::new(env::current_dir()?);
    let configuration = match config_loader.load_configuration(custom_config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log_error!("{}", e);
            return Ok(());
        }
    };
    let configured_mounts = configuration.mounts.len();

    let options = ServeOptions::merge(configuration, overrides);
    logger::init_logger(options.request_logging, options.timestamps);

    if options.items.is_empty() {
        println!("{}", cli::USAGE_HINT);
        return Ok(());
    }

    if has_cli_items && configured_mounts > 0 {
        log_warn!(
            "Ignoring {} mount(s) from the configuration file in favour of the command line items",
            configured_mounts
        );
    }

    let routes = match register_items(&options) {
        Ok(routes) => routes,
        Err(e) => {
            println!();
            log_error!("{}", e);
            return Ok(());
        }
    };

    let end_route = routes.has_shutdown_endpoint();
    let mounted = routes.routes().len();

    let runner = match ServerRunner::bind(routes, options.port, options.shutdown_timeout) {
        Ok(runner) => runner,
        Err(e) => {
            log_error!("{}", e);
            return Ok(());
        }
    };

    logger::get_logger().server_info(&NetworkUtils::server_url(runner.port()));
    if end_route {
        log_info!("Serving {} item(s); request /end or press Ctrl-C to stop", mounted);
    } else {
        log_info!("Serving {} item(s); press Ctrl-C to stop", mounted);
    }

    if let Err(e) = runner.run().await {
        log_error!("{}", e);
    }

    Ok(())
}

/// Resolve every item in order, asking for its path unless one is configured.
/// The first failure aborts the whole startup.
fn register_items(options: &ServeOptions) -> Result<RouteTable, ServeError> {
    let mut routes = RouteTable::new();
    if options.end_route {
        routes = routes.with_shutdown_endpoint();
    }

    let mut prompter = MountPrompter::stdio();
    for item in &options.items {
        let target = Target::resolve(&item.path)?;
        let mount = match item.pattern {
            Some(ref pattern) => target.into_mount(pattern),
            None => prompter.ask(target),
        };
        routes.register(mount)?;
    }

    Ok(routes)
}
