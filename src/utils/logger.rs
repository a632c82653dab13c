use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 優先，否則依模式決定預設過濾條件
fn filter_for(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

fn cli_directives(verbose: bool) -> &'static str {
    if verbose {
        "intake_form=debug,info"
    } else {
        // 一般模式只顯示警告，避免干擾表單輸出
        "intake_form=warn"
    }
}

const SERVICE_DIRECTIVES: &str = "intake_form=info,tower_http=info";

/// Compact lines on stderr; stdout is left to the terminal presenter.
pub fn init_cli_logger(verbose: bool) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(cli_directives(verbose)))
        .with(layer)
        .init();
}

/// JSON lines for the long-running endpoint.
pub fn init_service_logger() {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .json();

    tracing_subscriber::registry()
        .with(filter_for(SERVICE_DIRECTIVES))
        .with(layer)
        .init();
}
