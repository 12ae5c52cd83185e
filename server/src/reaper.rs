use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::registry::RoomRegistry;

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(300);
pub const MAX_ROOM_AGE: Duration = Duration::from_secs(3600);

/// Safety net for rooms whose close events never arrived: periodically
/// drops every room that is past its lifetime or has no participants left.
pub struct RoomReaper;

impl RoomReaper {
    pub async fn run(registry: Arc<RoomRegistry>, sweep_interval: Duration, max_age: Duration) {
        let mut ticker = tokio::time::interval(sweep_interval);

        // The first tick completes immediately; the first sweep should not.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = registry.sweep(max_age).await;
            if removed > 0 {
                info!("reaped {} stale room(s)", removed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::join_params::JoinParams;

    #[tokio::test(start_paused = true)]
    async fn reaper_sweeps_on_its_interval() {
        let registry = Arc::new(RoomRegistry::new());

        // A room nobody ever joined.
        registry
            .get_or_create(&JoinParams::new("abandoned"), 1)
            .await
            .unwrap();

        tokio::spawn(RoomReaper::run(
            registry.clone(),
            SWEEP_INTERVAL,
            MAX_ROOM_AGE,
        ));

        // Just before the first sweep the room is still visible.
        tokio::time::sleep(SWEEP_INTERVAL - Duration::from_secs(1)).await;
        assert!(registry.details("abandoned").await.is_some());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(registry.details("abandoned").await.is_none());
    }
}
