//! Progress phase: subscribe to the session's push channel, render the
//! latest snapshot, and hand the session id forward once the backend reports
//! completion.

pub mod state;
pub mod subscription;

pub use state::{
    ChannelEvent, ConnectionState, ProgressTracker, StageRow, Transition, display_percent,
    stage_checklist,
};
pub use subscription::ProgressSubscription;

use std::time::Duration;

/// Sink for progress renders; implemented by the terminal UI and by tests.
pub trait ProgressView {
    fn render(&mut self, tracker: &ProgressTracker);

    /// Called once when the phase is about to hand off to the dashboard.
    fn finish(&mut self, tracker: &ProgressTracker);
}

/// Drive `subscription` until the analysis completes.
///
/// Resolves with the session id after `completion_delay`, exactly once, so
/// the final render can settle at 100%. On transport loss the view keeps
/// showing the connecting warning and this future stays pending: there is no
/// reconnect, and the caller decides when to abandon the phase (dropping the
/// future closes the channel).
pub async fn run_progress<V: ProgressView + ?Sized>(
    mut subscription: ProgressSubscription,
    view: &mut V,
    completion_delay: Duration,
) -> String {
    let mut tracker = ProgressTracker::new(subscription.session_id());
    view.render(&tracker);

    while let Some(event) = subscription.next().await {
        let transition = tracker.apply(event);
        view.render(&tracker);
        if transition == Transition::ScheduleCompletion {
            tracing::info!(session = %tracker.session_id(), "analysis completed");
            tokio::time::sleep(completion_delay).await;
            view.finish(&tracker);
            subscription.close().await;
            return tracker.session_id().to_string();
        }
    }

    tracing::warn!(
        session = %tracker.session_id(),
        "progress channel ended before completion; waiting for the user"
    );
    std::future::pending().await
}
