use scorehub::{player::GREY, AppError, Category, GameType};

mod utils;

use utils::*;

#[tokio::test]
async fn test_full_sheet_totals_reach_the_leaderboard() {
    let mut setup = TestSetupBuilder::new()
        .with_players(vec!["alice", "bob"])
        .build()
        .await;
    let players = setup.pick(&["alice", "bob"]);

    // alice: 3+6+9+12+15+18 = 63 upper (bonus 35) + 25 full house + 50 yahtzee = 173
    let session = SessionBuilder::new(&players)
        .score(0, Category::Ones, 3)
        .score(0, Category::Twos, 6)
        .score(0, Category::Threes, 9)
        .score(0, Category::Fours, 12)
        .score(0, Category::Fives, 15)
        .score(0, Category::Sixes, 18)
        .score(0, Category::FullHouse, 25)
        .score(0, Category::Yahtzee, 50)
        .score(1, Category::Chance, 30)
        .score(1, Category::LargeStraight, 40)
        .build();
    assert_eq!(session.sheets()[0].grand_total(), 173);
    assert_eq!(session.sheets()[1].grand_total(), 70);

    setup.record(session).await;

    let top = setup.stats.top_results(GameType::Yahtzee).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].result.player_name, "alice");
    assert_eq!(top[0].result.score, 173);
    assert!(top[0].result.is_winner);
    assert!(!top[1].result.is_winner);
    assert!(!top[1].result.is_draw);
}

#[tokio::test]
async fn test_stats_table_and_best_player() {
    for sqlite in [false, true] {
        let builder = TestSetupBuilder::new().with_three_players();
        let builder = if sqlite { builder.with_sqlite() } else { builder };
        let mut setup = builder.build().await;
        let all = setup.pick(&["alice", "bob", "carol"]);
        let alice_bob = setup.pick(&["alice", "bob"]);

        setup
            .record(SessionBuilder::new(&all).with_chances(&[30, 20, 10]).build())
            .await;
        setup
            .record(SessionBuilder::new(&alice_bob).with_chances(&[15, 25]).build())
            .await;
        setup
            .record(SessionBuilder::new(&alice_bob).with_chances(&[22, 22]).build())
            .await;

        let table = setup.stats.stats_table(GameType::Yahtzee).await.unwrap();
        let order: Vec<&str> = table.ranked.iter().map(|e| e.player.name.as_str()).collect();
        assert_eq!(order, vec!["alice", "bob", "carol"]);
        assert!(table.unranked.is_empty());

        let alice = &table.ranked[0].stats;
        assert_eq!(alice.counted_games, 3);
        assert_eq!(alice.wins, 1);
        assert_eq!(alice.draws, 1);
        assert_eq!(alice.best_score, 30);
        assert_eq!(alice.worst_score, 15);

        // bob has the same wins and draws but a lower best score
        let bob = &table.ranked[1].stats;
        assert_eq!((bob.wins, bob.draws), (1, 1));
        assert_eq!(bob.best_score, 25);

        let best = setup.stats.best_player(GameType::Yahtzee).await.unwrap().unwrap();
        assert_eq!(best.player.name, "alice");

        let best_score = setup.stats.best_score(GameType::Yahtzee).await.unwrap().unwrap();
        assert_eq!(best_score.result.score, 30);
        assert_eq!(best_score.color, setup.player("alice").color);
    }
}

#[tokio::test]
async fn test_solo_sessions_do_not_count() {
    let mut setup = TestSetupBuilder::new().with_three_players().build().await;
    let alice = setup.pick(&["alice"]);
    let bob_carol = setup.pick(&["bob", "carol"]);

    setup
        .record(SessionBuilder::new(&alice).with_chances(&[30]).build())
        .await;
    setup
        .record(SessionBuilder::new(&alice).with_chances(&[28]).build())
        .await;
    setup
        .record(SessionBuilder::new(&bob_carol).with_chances(&[5, 6]).build())
        .await;

    let alice_id = setup.player("alice").id;
    let stats = setup.stats.aggregate(alice_id, GameType::Yahtzee).await.unwrap();
    assert_eq!(stats.total_games, 2);
    assert_eq!(stats.counted_games, 0);
    assert_eq!(stats.wins, 0);
    assert_eq!(stats.win_percentage(), 0.0);

    let table = setup.stats.stats_table(GameType::Yahtzee).await.unwrap();
    let ranked: Vec<&str> = table.ranked.iter().map(|e| e.player.name.as_str()).collect();
    assert_eq!(ranked, vec!["carol", "bob"]);
    assert_eq!(table.unranked.len(), 1);
    assert_eq!(table.unranked[0].player.name, "alice");

    // the solo score still counts for the leaderboard
    let best = setup.stats.best_score(GameType::Yahtzee).await.unwrap().unwrap();
    assert_eq!(best.result.player_name, "alice");
    assert_eq!(best.result.score, 30);
}

#[tokio::test]
async fn test_rename_and_delete_player() {
    for sqlite in [false, true] {
        let builder = TestSetupBuilder::new().with_players(vec!["alice", "bob"]);
        let builder = if sqlite { builder.with_sqlite() } else { builder };
        let mut setup = builder.build().await;
        let players = setup.pick(&["alice", "bob"]);
        setup
            .record(SessionBuilder::new(&players).with_chances(&[12, 24]).build())
            .await;

        let bob = setup.player("bob");
        setup
            .players
            .update_player(bob.id, "robert", bob.color)
            .await
            .unwrap();

        let duplicate = setup.players.update_player(bob.id, "alice", bob.color).await;
        assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

        let top = setup.stats.top_results(GameType::Yahtzee).await.unwrap();
        assert_eq!(top[0].result.player_name, "robert");
        assert_eq!(top[0].color, bob.color);
        assert_eq!(top[1].result.player_name, "alice");

        setup.players.delete_player(bob.id).await.unwrap();

        let top = setup.stats.top_results(GameType::Yahtzee).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].result.player_name, "robert");
        assert_eq!(top[0].color, GREY);
    }
}

#[tokio::test]
async fn test_leaderboard_limit() {
    let mut setup = TestSetupBuilder::new()
        .with_players(vec!["alice", "bob"])
        .with_top_results_limit(3)
        .build()
        .await;
    let players = setup.pick(&["alice", "bob"]);

    for (a, b) in [(10, 11), (12, 13), (14, 15)] {
        setup
            .record(SessionBuilder::new(&players).with_chances(&[a, b]).build())
            .await;
    }

    let scores: Vec<i32> = setup
        .stats
        .top_results(GameType::Yahtzee)
        .await
        .unwrap()
        .iter()
        .map(|e| e.result.score)
        .collect();
    assert_eq!(scores, vec![15, 14, 13]);

    let most_wins = setup.stats.most_wins(GameType::Yahtzee).await.unwrap().unwrap();
    assert_eq!(most_wins.player_id, setup.player("bob").id);
    assert_eq!(most_wins.wins, 3);
}
