use baselog::{Severity, StderrLogger, install_log_bridge, log, logging_config, scoped_severity};

fn main() {
    logging_config()
        .with_args(std::env::args())
        .with_logger(StderrLogger::new().with_color(true))
        .init();
    install_log_bridge().expect("log bridge already installed");

    log!(Info, "Hello, world!");
    let handles: Vec<_> = (0..5)
        .map(|i| {
            std::thread::spawn(move || {
                // Lines of one record stay together whatever the other threads do.
                log!(Warning, "thread {i} says:\n\thello\n\tgoodbye");
                log::info!("thread {i} via the log crate");
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    {
        let _verbose = scoped_severity(Severity::Verbose);
        log!(Verbose, "visible inside the scope");
    }
    log!(Verbose, "hidden again");
}
