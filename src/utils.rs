use glib::MainContext;
use once_cell::sync::Lazy;
use tokio::sync::oneshot;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

/// Runs `fut` on the runtime and hands its output to `on_done` on the GTK
/// main loop. Nothing is cancelled or deduplicated: every call delivers.
pub fn run_async_to_main<T, Fut, F>(fut: Fut, on_done: F)
where
    T: Send + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
    F: FnOnce(T) + 'static,
{
    let (tx, rx) = oneshot::channel();
    spawn_async(async move {
        if tx.send(fut.await).is_err() {
            log::debug!("result dropped, receiver gone");
        }
    });
    MainContext::default().spawn_local(async move {
        match rx.await {
            Ok(res) => on_done(res),
            Err(_) => log::warn!("background task ended without a result"),
        }
    });
}

/// Trims the input, defaults to plain http and drops trailing slashes.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
