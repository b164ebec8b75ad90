//! Drivers that sit on top of `gaul-core`'s `Population`: the generational
//! engine (crossover/mutation/adapt/survival per generation), the
//! steady-state engine (one child pair and one mutant per iteration, handed
//! straight to a replace policy), and parallel evaluator variants that
//! distribute only the `evaluate` call across a worker pool.

pub mod config;
pub mod generational;
pub mod parallel;
pub mod steady_state;

pub use config::ParallelConfig;

pub fn init_logging() {
    use std::sync::Once;
    static INIT_LOGGING: Once = Once::new();

    INIT_LOGGING.call_once(|| {
        use tracing_subscriber::fmt::format::FmtSpan;
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        std::panic::set_hook(Box::new(|info| {
            tracing::error!("PANIC: {}", info);
        }));

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                    .with_target(false)
                    .with_level(true)
                    .compact(),
            )
            .init();
    });
}
