/// Tests for goal and record services, interval progress and widget export
/// These tests run the services over the in-memory repositories

#[cfg(test)]
mod goal_service_tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use goaltrack_core::config::IndicatorPalette;
    use goaltrack_core::goals::{
        GoalService, GoalServiceTrait, InMemoryGoalRepository, IsoDuration, NewGoal,
    };
    use goaltrack_core::records::{
        InMemoryRecordRepository, NewRecord, RecordService, RecordServiceTrait,
    };
    use goaltrack_core::Error;

    type Services = (
        GoalService<InMemoryGoalRepository, InMemoryRecordRepository>,
        RecordService<InMemoryGoalRepository, InMemoryRecordRepository>,
    );

    fn services() -> Services {
        let goal_repo = Arc::new(InMemoryGoalRepository::new());
        let record_repo = Arc::new(InMemoryRecordRepository::new());
        (
            GoalService::new(goal_repo.clone(), record_repo.clone()),
            RecordService::new(goal_repo, record_repo),
        )
    }

    fn spending_goal(reset: bool) -> NewGoal {
        NewGoal {
            name: "Spending".to_string(),
            unit: "dollar".to_string(),
            interval_start_date: Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap(),
            interval_length: IsoDuration::days(30),
            bucket_size: IsoDuration::days(1),
            interval_start_amount: 0.0,
            interval_target_amount: 10_000.0,
            reset,
        }
    }

    fn new_record(goal_id: &str, day: u32, amount: f64) -> NewRecord {
        NewRecord {
            goal_id: goal_id.to_string(),
            date: Utc.with_ymd_and_hms(2023, 10, day, 12, 0, 0).unwrap(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_goals() {
        let (goals, _) = services();

        let created = goals.create_goal(spending_goal(false)).await.unwrap();
        assert!(!created.id.is_empty(), "Created goal gets an id");

        let listed = goals.get_goals().unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(goals.get_goal(&created.id).unwrap(), created);
    }

    #[tokio::test]
    async fn test_invalid_goal_is_rejected() {
        let (goals, _) = services();
        let mut invalid = spending_goal(false);
        invalid.name = String::new();

        let err = goals.create_goal(invalid).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "Missing name is a validation error");
        assert!(goals.get_goals().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_for_unknown_goal_is_not_found() {
        let (_, records) = services();

        let err = records
            .create_record(new_record("missing", 2, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_records_keep_logged_order() {
        let (goals, records) = services();
        let goal = goals.create_goal(spending_goal(false)).await.unwrap();

        for (day, amount) in [(5, 10.0), (2, 20.0), (9, 30.0)] {
            records.create_record(new_record(&goal.id, day, amount)).await.unwrap();
        }

        let amounts: Vec<f64> = records
            .get_records_for_goal(&goal.id)
            .unwrap()
            .iter()
            .map(|r| r.amount)
            .collect();
        assert_eq!(amounts, vec![10.0, 20.0, 30.0], "Records are listed as logged");
    }

    #[tokio::test]
    async fn test_series_for_goal_merges_days() {
        let (goals, records) = services();
        let goal = goals.create_goal(spending_goal(false)).await.unwrap();

        records.create_record(new_record(&goal.id, 30, 1.0)).await.unwrap();
        records.create_record(new_record(&goal.id, 31, 9.0)).await.unwrap();
        records.create_record(new_record(&goal.id, 31, 5.0)).await.unwrap();

        let series = records.series_for_goal(&goal.id).unwrap();
        assert_eq!(series.sum, 15.0);
        assert_eq!(series.values(), vec![1.0, 15.0]);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let (goals, records) = services();
        let goal = goals.create_goal(spending_goal(false)).await.unwrap();
        let record = records.create_record(new_record(&goal.id, 3, 4.0)).await.unwrap();
        let record_id = record.id.clone().expect("persisted record has an id");

        assert_eq!(records.delete_record(record_id.clone()).await.unwrap(), 1);
        assert!(records.get_records().unwrap().is_empty());

        let err = records.delete_record(record_id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "Second delete finds nothing");
    }

    #[tokio::test]
    async fn test_delete_goal_removes_its_records() {
        let (goals, records) = services();
        let kept = goals.create_goal(spending_goal(false)).await.unwrap();
        let dropped = goals.create_goal(spending_goal(true)).await.unwrap();

        records.create_record(new_record(&kept.id, 1, 1.0)).await.unwrap();
        records.create_record(new_record(&dropped.id, 1, 2.0)).await.unwrap();
        records.create_record(new_record(&dropped.id, 2, 3.0)).await.unwrap();

        assert_eq!(goals.delete_goal(dropped.id.clone()).await.unwrap(), 1);

        let remaining = records.get_records().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].goal_id, kept.id);
        assert!(matches!(goals.get_goal(&dropped.id), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_deleting_missing_goal_is_a_no_op() {
        let (goals, records) = services();
        let kept = goals.create_goal(spending_goal(false)).await.unwrap();
        records.create_record(new_record(&kept.id, 1, 1.0)).await.unwrap();

        assert_eq!(goals.delete_goal("missing".to_string()).await.unwrap(), 0);
        assert_eq!(goals.delete_goal(kept.id.clone()).await.unwrap(), 1);
        assert_eq!(
            goals.delete_goal(kept.id.clone()).await.unwrap(),
            0,
            "Second delete finds nothing"
        );
        assert!(records.get_records().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_goal_update_is_rejected() {
        let (goals, _) = services();
        let created = goals.create_goal(spending_goal(true)).await.unwrap();

        let mut unnamed = created.clone();
        unnamed.name = "  ".to_string();
        let err = goals.update_goal(unnamed).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "Blank name is a validation error");

        let mut zero_interval = created.clone();
        zero_interval.interval_length = IsoDuration::days(0);
        let err = goals.update_goal(zero_interval).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "Zero interval is a validation error");

        assert_eq!(goals.get_goal(&created.id).unwrap(), created, "Stored goal is unchanged");

        let mut renamed = created.clone();
        renamed.name = "Groceries".to_string();
        assert_eq!(goals.update_goal(renamed.clone()).await.unwrap(), renamed);
    }

    #[tokio::test]
    async fn test_progress_counts_only_current_interval_for_reset_goals() {
        let (goals, records) = services();
        let goal = goals.create_goal(spending_goal(true)).await.unwrap();

        // Interval 1: Oct 1 - Oct 31 (exclusive), interval 2 starts Oct 31
        records.create_record(new_record(&goal.id, 5, 100.0)).await.unwrap();
        records.create_record(new_record(&goal.id, 30, 50.0)).await.unwrap();
        records.create_record(new_record(&goal.id, 31, 25.0)).await.unwrap();

        let in_first = Utc.with_ymd_and_hms(2023, 10, 20, 0, 0, 0).unwrap();
        let in_second = Utc.with_ymd_and_hms(2023, 11, 10, 0, 0, 0).unwrap();

        assert_eq!(goals.progress_for_goal(&goal.id, in_first).unwrap(), 150.0);
        assert_eq!(goals.progress_for_goal(&goal.id, in_second).unwrap(), 25.0);
    }

    #[tokio::test]
    async fn test_progress_accumulates_for_non_reset_goals() {
        let (goals, records) = services();
        let mut new_goal = spending_goal(false);
        new_goal.interval_start_amount = 1000.0;
        let goal = goals.create_goal(new_goal).await.unwrap();

        records.create_record(new_record(&goal.id, 5, 100.0)).await.unwrap();
        records.create_record(new_record(&goal.id, 31, 25.0)).await.unwrap();

        let later = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            goals.progress_for_goal(&goal.id, later).unwrap(),
            1125.0,
            "Progress starts from the interval start amount"
        );
    }

    #[tokio::test]
    async fn test_goal_summaries_fill_progress_and_indicator() {
        let (goals, records) = services();
        let goal = goals.create_goal(spending_goal(false)).await.unwrap();
        records.create_record(new_record(&goal.id, 2, 5431.0)).await.unwrap();

        let now = Utc.with_ymd_and_hms(2023, 10, 15, 0, 0, 0).unwrap();
        let summaries = goals.goal_summaries(now, &IndicatorPalette::default()).unwrap();

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.progress, Some(5431.0));
        assert_eq!(summary.goal_progress, Some(10_000.0));
        assert!((summary.indicator.fraction - 0.5431).abs() < 1e-9);
        assert_eq!(summary.indicator.percent, 54);
    }

    #[tokio::test]
    async fn test_goal_cards_use_cumulative_series() {
        let (goals, records) = services();
        let with_records = goals.create_goal(spending_goal(false)).await.unwrap();
        let without_records = goals.create_goal(spending_goal(true)).await.unwrap();

        records.create_record(new_record(&with_records.id, 1, 3.0)).await.unwrap();
        records.create_record(new_record(&with_records.id, 1, 4.0)).await.unwrap();
        records.create_record(new_record(&with_records.id, 2, 5.0)).await.unwrap();

        let cards = goals.goal_cards().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].goal_id, with_records.id);
        assert_eq!(cards[0].sparkline, vec![7.0, 12.0]);
        assert_eq!(cards[0].current_value, 12.0);
        assert_eq!(cards[1].goal_id, without_records.id);
        assert_eq!(cards[1].current_value, 0.0);
    }
}

#[cfg(test)]
mod widget_export_tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use goaltrack_core::goals::{GoalRepositoryTrait, InMemoryGoalRepository, IsoDuration, NewGoal};
    use goaltrack_core::records::{InMemoryRecordRepository, NewRecord, RecordRepositoryTrait};
    use goaltrack_core::widgets::{
        InMemoryWidgetBridge, NoopWidgetBridge, WidgetBridge, WidgetSyncService,
    };
    use goaltrack_core::Error;

    fn driving_goal() -> NewGoal {
        NewGoal {
            name: "Driving".to_string(),
            unit: "mile".to_string(),
            interval_start_date: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            interval_length: IsoDuration::days(365),
            bucket_size: IsoDuration::days(7),
            interval_start_amount: 0.0,
            interval_target_amount: 2000.0,
            reset: false,
        }
    }

    #[tokio::test]
    async fn test_export_all_stores_a_snapshot_per_goal() {
        let goal_repo = Arc::new(InMemoryGoalRepository::new());
        let record_repo = Arc::new(InMemoryRecordRepository::new());
        let bridge = Arc::new(InMemoryWidgetBridge::new());

        let goal = goal_repo.insert_new_goal(driving_goal()).await.unwrap();
        let idle = goal_repo.insert_new_goal(driving_goal()).await.unwrap();
        for (day, miles) in [(3, 120.0), (3, 80.0), (4, 300.0)] {
            record_repo
                .insert_new_record(NewRecord {
                    goal_id: goal.id.clone(),
                    date: Utc.with_ymd_and_hms(2023, 2, day, 8, 0, 0).unwrap(),
                    amount: miles,
                })
                .await
                .unwrap();
        }

        let sync = WidgetSyncService::new(goal_repo, record_repo, bridge.clone());
        assert_eq!(sync.export_all().await.unwrap(), 2);

        let snapshot = bridge.snapshot(&goal.id).await.expect("snapshot exported");
        assert_eq!(snapshot.sparkline, vec![200.0, 500.0]);
        assert_eq!(snapshot.current_value, 500.0);
        assert_eq!(snapshot.fraction, 0.25);

        let idle_snapshot = bridge.snapshot(&idle.id).await.expect("idle goal exported too");
        assert_eq!(idle_snapshot.current_value, 0.0);
        assert_eq!(idle_snapshot.fraction, 0.0);
        assert_eq!(bridge.snapshots().await.len(), 2);
    }

    #[tokio::test]
    async fn test_export_unknown_goal_fails() {
        let sync = WidgetSyncService::new(
            Arc::new(InMemoryGoalRepository::new()),
            Arc::new(InMemoryRecordRepository::new()),
            Arc::new(NoopWidgetBridge),
        );
        assert!(matches!(sync.export_goal("missing").await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_noop_bridge_accepts_exports() {
        let goal = driving_goal().into_goal("g-1".to_string());
        assert!(NoopWidgetBridge.export_widget_snapshot(&goal, &[]).await.is_ok());
    }
}

#[cfg(test)]
mod goal_page_controls_tests {
    use chrono::Utc;
    use goaltrack_core::goals::{IsoDuration, NewGoal};
    use goaltrack_core::view_controls::{
        goal_page_controls, InMemoryViewControls, ViewAction, ViewControlsPort, ACTION_NEW_RECORD,
    };

    #[test]
    fn test_goal_page_pushes_title_and_log_action() {
        let goal = NewGoal {
            name: "Calories".to_string(),
            unit: "kilocalorie".to_string(),
            interval_start_date: Utc::now(),
            interval_length: IsoDuration::days(1),
            bucket_size: IsoDuration::seconds(300),
            interval_start_amount: 0.0,
            interval_target_amount: 2000.0,
            reset: true,
        }
        .into_goal("g-7".to_string());

        let port = InMemoryViewControls::new();
        port.apply(goal_page_controls(&goal));
        let controls = port.controls();

        assert_eq!(controls.title.as_deref(), Some("Calories"));
        match controls.trailing_action {
            Some(ViewAction::Button(item)) => {
                assert_eq!(item.id, ACTION_NEW_RECORD);
                assert_eq!(item.content.as_deref(), Some("Log calories"));
            }
            other => panic!("unexpected trailing action {:?}", other),
        }
    }
}
