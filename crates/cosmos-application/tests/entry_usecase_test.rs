use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cosmos_application::{EntryUseCase, PreloadOutcome};
use cosmos_core::audio::{AudioAsset, AudioPreloader};
use cosmos_core::timing::units;
use cosmos_core::{CosmosError, Result, Route, Scale, Session};
use tokio::time::Instant;

enum Behavior {
    Ready,
    Fail,
    Hang,
}

struct FakePreloader(Behavior);

#[async_trait]
impl AudioPreloader for FakePreloader {
    async fn preload(&self, asset: &AudioAsset) -> Result<()> {
        match self.0 {
            Behavior::Ready => Ok(()),
            Behavior::Fail => Err(CosmosError::asset_not_found(
                asset.path.display().to_string(),
            )),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }
}

fn usecase(behavior: Behavior) -> EntryUseCase {
    EntryUseCase::new(Arc::new(FakePreloader(behavior)), AudioAsset::default())
}

#[tokio::test]
async fn test_submit_starts_session() {
    let mut session = Session::new();
    let submission = usecase(Behavior::Ready)
        .submit(&mut session, "deadline stress")
        .await
        .unwrap();

    assert_eq!(submission.route, Route::Meditation);
    assert_eq!(submission.preload, PreloadOutcome::Loaded);
    assert_eq!(session.worry(), "deadline stress");
    assert!(session.is_active());
    assert_eq!(session.scale(), Scale::Earth);
}

#[tokio::test]
async fn test_submit_resets_previous_state() {
    let mut session = Session::new();
    session.set_worry("old worry");
    session.set_scale(Scale::Galaxy);

    usecase(Behavior::Ready)
        .submit(&mut session, "  rent is due  ")
        .await
        .unwrap();

    assert_eq!(session.worry(), "  rent is due  ");
    assert_eq!(session.scale(), Scale::Earth);
}

#[tokio::test]
async fn test_empty_worry_rejected() {
    let mut session = Session::new();
    let err = usecase(Behavior::Ready)
        .submit(&mut session, "")
        .await
        .unwrap_err();
    assert_eq!(err, CosmosError::EmptyWorry);
    assert_eq!(session, Session::new());
}

#[tokio::test]
async fn test_worry_kept_verbatim() {
    for input in ["  deadline stress ", "   "] {
        let mut session = Session::new();
        usecase(Behavior::Ready)
            .submit(&mut session, input)
            .await
            .unwrap();
        assert_eq!(session.worry(), input);
        assert!(session.is_active());
    }
}

#[tokio::test]
async fn test_preload_failure_still_proceeds() {
    let mut session = Session::new();
    let submission = usecase(Behavior::Fail)
        .submit(&mut session, "exams")
        .await
        .unwrap();

    assert_eq!(submission.route, Route::Meditation);
    assert_eq!(submission.preload, PreloadOutcome::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_preload_times_out_after_three_units() {
    let mut session = Session::new();
    let started = Instant::now();

    let submission = usecase(Behavior::Hang)
        .submit(&mut session, "exams")
        .await
        .unwrap();

    assert_eq!(submission.preload, PreloadOutcome::TimedOut);
    assert_eq!(submission.route, Route::Meditation);
    let waited = started.elapsed();
    assert!(waited >= units(3) && waited < units(4), "waited {:?}", waited);
}
