/// Evaluates `$body` and logs the wall time of the named pipeline stage.
macro_rules! timed_stage {
    ($stage:expr, $body:expr) => {{
        let started = jiff::Timestamp::now();
        let output = $body;
        let elapsed = jiff::Timestamp::now().duration_since(started);
        tracing::debug!(stage = $stage, elapsed = ?elapsed, "stage finished");
        output
    }};
}

pub(crate) use timed_stage;
