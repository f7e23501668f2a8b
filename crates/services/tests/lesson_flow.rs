use std::sync::Arc;
use std::time::Duration;

use mentor_core::model::{
    Catalog, DialoguePhase, Level, Lesson, MentorshipProfile, Mission, MissionId,
};
use mentor_core::time::fixed_now;
use services::{
    AdvanceOutcome, Clock, Delivery, GuidebookOutcome, LeaderboardService, LessonWorkflow,
    MentorService, ProgressService, QuizFeedback, RemoteSync,
};
use storage::{InMemoryProfileRepository, InMemorySnapshotStore, ProfileRepository, SnapshotStore};

async fn complete_lesson(
    workflow: &mut LessonWorkflow,
    progress: &mut ProgressService,
    mentor: &MentorService,
    mission: &Mission,
    lesson: &Lesson,
) {
    let ticket = workflow.open_lesson(mission, lesson, progress.lesson_completed(&lesson.id));
    let script = mentor
        .dialogue(
            &MentorshipProfile::default(),
            mission,
            lesson,
            DialoguePhase::Intro,
            "서연",
        )
        .await;
    let turns = script.len();
    assert_eq!(
        workflow.deliver_script(ticket, script).expect("deliver script"),
        Delivery::Applied
    );

    let session = workflow.session_mut().expect("open session");
    for _ in 1..turns {
        assert!(matches!(
            session.advance().expect("reveal turn"),
            AdvanceOutcome::Revealed(_)
        ));
    }
    assert_eq!(
        session.advance().expect("leave the chat"),
        AdvanceOutcome::GuidebookEntered
    );

    match session.acknowledge_guidebook().expect("acknowledge guidebook") {
        GuidebookOutcome::QuizEntered => {
            let quiz = lesson.quiz.as_ref().expect("quiz present");
            assert_eq!(
                session
                    .submit_choice(quiz.choice.correct_index)
                    .expect("submit choice"),
                QuizFeedback::ChoiceCorrect
            );
            assert_eq!(
                session.submit_short(&quiz.short.answer).expect("submit short"),
                QuizFeedback::LessonCompleted
            );
        }
        GuidebookOutcome::LessonFinished => assert!(lesson.quiz.is_none()),
    }

    let finished = workflow.finalize().expect("finalize completed lesson");
    assert_eq!(finished, lesson.id);
    progress.complete_lesson(&finished).expect("record lesson");
}

#[tokio::test(start_paused = true)]
async fn lesson_flow_login_to_leaderboard() {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let repository: Arc<dyn ProfileRepository> = repo.clone();
    let snapshots: Arc<dyn SnapshotStore> = Arc::new(InMemorySnapshotStore::new());
    let sync = RemoteSync::with_delay(Arc::clone(&repository), Duration::from_millis(100));
    let mentor = MentorService::new(None);
    let mut progress = ProgressService::new(
        Catalog::builtin(),
        Clock::fixed(fixed_now()),
        snapshots,
        sync.clone(),
    );
    let mut workflow = LessonWorkflow::new();

    progress.login("서연", "seoyeon@example.com").await;
    assert_eq!(progress.progress().xp, 0);
    assert!(!progress.mission_locked(0));
    assert!(progress.mission_locked(1));

    let mission_id = MissionId::from("1-1");
    let mission = progress
        .catalog()
        .mission(&mission_id)
        .expect("flagship mission")
        .clone();

    for (index, lesson) in mission.lessons.iter().enumerate() {
        assert!(
            !progress.lesson_locked(&mission_id, index).expect("lock query"),
            "lesson {index} should be unlocked by its predecessor"
        );
        complete_lesson(&mut workflow, &mut progress, &mentor, &mission, lesson).await;
    }

    assert!(progress.mission_ready(&mission_id).expect("mission ready"));
    let updated = progress.report_mission(&mission_id).expect("report mission").clone();
    assert_eq!(updated.xp, 800);
    assert_eq!(updated.level, Level::Junior);
    assert_eq!(updated.completed_missions, 1);
    assert_eq!(updated.progress_percent, 50);

    // reporting again changes nothing
    let again = progress.report_mission(&mission_id).expect("repeat report");
    assert_eq!(again.xp, 800);

    // the second mission unlocked
    assert!(!progress.mission_locked(1));

    // the debounced sync pushed the final state exactly where it should be
    sync.settle().await;
    let row = repo
        .find_by_email("seoyeon@example.com")
        .await
        .expect("backend read")
        .expect("profile row");
    assert_eq!(row.nickname, "서연");
    assert_eq!(row.xp, 800);
    assert_eq!(row.level, "Lv.2 주니어 분석가");
    assert_eq!(row.completed_missions, 1);

    let leaderboard = LeaderboardService::new(repository);
    let rankings = leaderboard
        .rankings(Some("seoyeon@example.com"))
        .await
        .expect("rankings");
    assert_eq!(rankings.len(), 1);
    assert!(rankings[0].is_me);
    assert_eq!(rankings[0].xp, 800);
}

#[tokio::test(start_paused = true)]
async fn progress_survives_a_restart_through_the_snapshot_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = Arc::new(InMemoryProfileRepository::new());
    let repository: Arc<dyn ProfileRepository> = repo.clone();
    let sync = RemoteSync::with_delay(repository, Duration::from_millis(100));
    let mentor = MentorService::new(None);

    {
        let snapshots: Arc<dyn SnapshotStore> =
            Arc::new(storage::JsonSnapshotStore::in_dir(dir.path()));
        let mut progress = ProgressService::new(
            Catalog::builtin(),
            Clock::fixed(fixed_now()),
            snapshots,
            sync.clone(),
        );
        let mut workflow = LessonWorkflow::new();

        progress.login("서연", "seoyeon@example.com").await;
        let mission = progress
            .catalog()
            .mission(&"1-1".into())
            .expect("flagship mission")
            .clone();
        for lesson in mission.lessons.clone() {
            complete_lesson(&mut workflow, &mut progress, &mentor, &mission, &lesson).await;
        }
        progress.report_mission(&mission.id).expect("report mission");
    }
    sync.settle().await;

    let snapshots: Arc<dyn SnapshotStore> =
        Arc::new(storage::JsonSnapshotStore::in_dir(dir.path()));
    let restarted = ProgressService::new(
        Catalog::builtin(),
        Clock::fixed(fixed_now()),
        snapshots,
        sync,
    );
    assert_eq!(restarted.progress().xp, 800);
    assert_eq!(restarted.progress().email, "seoyeon@example.com");
    assert!(restarted.mission_completed(&"1-1".into()));
    assert!(restarted.lesson_completed(&"1-1-8".into()));
    assert!(!restarted.mission_locked(1));
}

#[tokio::test(start_paused = true)]
async fn review_replays_without_changing_progress() {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let repository: Arc<dyn ProfileRepository> = repo.clone();
    let snapshots: Arc<dyn SnapshotStore> = Arc::new(InMemorySnapshotStore::new());
    let sync = RemoteSync::with_delay(repository, Duration::from_millis(100));
    let mentor = MentorService::new(None);
    let mut progress = ProgressService::new(
        Catalog::builtin(),
        Clock::fixed(fixed_now()),
        snapshots,
        sync.clone(),
    );
    let mut workflow = LessonWorkflow::new();

    progress.login("서연", "seoyeon@example.com").await;
    let mission = progress
        .catalog()
        .mission(&"1-1".into())
        .expect("flagship mission")
        .clone();
    let lesson = mission.lessons[0].clone();
    complete_lesson(&mut workflow, &mut progress, &mentor, &mission, &lesson).await;

    sync.settle().await;
    let synced_before = repo.upsert_count();

    // revisit the finished lesson
    workflow.open_lesson(&mission, &lesson, progress.lesson_completed(&lesson.id));
    let ticket = workflow.begin_replay().expect("choose replay");
    let script = mentor
        .dialogue(
            &MentorshipProfile::default(),
            &mission,
            &lesson,
            DialoguePhase::Intro,
            "서연",
        )
        .await;
    workflow.deliver_script(ticket, script).expect("deliver replay");

    let session = workflow.session_mut().expect("review session");
    while !matches!(
        session.advance().expect("advance replay"),
        AdvanceOutcome::GuidebookEntered
    ) {}
    assert_eq!(session.cosmetic_xp(), 0);

    // replaying granted nothing and synced nothing new
    assert_eq!(progress.progress().xp, 0);
    sync.settle().await;
    assert_eq!(repo.upsert_count(), synced_before);
}
