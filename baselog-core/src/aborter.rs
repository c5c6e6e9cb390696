/// Terminal step of a `Fatal` record. Receives the full, unsplit message.
pub trait Aborter: Send + Sync {
    fn abort(&self, message: &str) -> !;
}

/// Terminates the process abnormally.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAborter;

impl Aborter for DefaultAborter {
    fn abort(&self, _message: &str) -> ! {
        std::process::abort()
    }
}
