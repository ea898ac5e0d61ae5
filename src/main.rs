use scorehub::{
    db, order_players, player::ColorCursor, AppConfig, AppState, GameType, Preferences,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scorehub=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new();
    info!(database_url = %config.database_url, "Starting score tracker");

    let pool = db::connect(&config.database_url).await?;
    db::init_schema(&pool).await?;

    let state = AppState::sqlite(pool);
    let players = state.player_service();
    let stats = state.stats_service(config.top_results_limit);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("players") => {
            let prefs = Preferences::load(&config.preferences_path).await?;
            let roster = order_players(players.list_players().await?, &prefs.last_player_order);
            for player in roster {
                println!("{:>4}  #{:08X}  {}", player.id, player.color, player.name);
            }
        }
        Some("add") => {
            let name = args[1..].join(" ");
            // Hand out palette colours in order, one step per existing player
            let mut cursor = ColorCursor::new();
            for _ in 0..players.list_players().await?.len() {
                cursor = cursor.next_color().1;
            }
            let (color, _) = cursor.next_color();
            let player = players.add_player(&name, color).await?;
            println!("Added {} ({})", player.name, player.id);
        }
        Some("stats") => {
            let table = stats.stats_table(GameType::Yahtzee).await?;
            println!(
                "{:<20} {:>5} {:>5} {:>7} {:>7} {:>7} {:>5} {:>5}",
                "player", "games", "wins", "win%", "draw%", "loss%", "best", "worst"
            );
            for entry in table.ranked.iter().chain(table.unranked.iter()) {
                let s = &entry.stats;
                println!(
                    "{:<20} {:>5} {:>5} {:>6.1}% {:>6.1}% {:>6.1}% {:>5} {:>5}",
                    entry.player.name,
                    s.total_games,
                    s.wins,
                    s.win_percentage(),
                    s.draw_percentage(),
                    s.loss_percentage(),
                    s.best_score,
                    s.worst_score
                );
            }
        }
        Some("top") => {
            for (rank, entry) in stats
                .top_results(GameType::Yahtzee)
                .await?
                .iter()
                .enumerate()
            {
                println!(
                    "{:>3}. {:>4}  {:<20} {}",
                    rank + 1,
                    entry.result.score,
                    entry.result.player_name,
                    entry.result.played_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        _ => {
            match stats.best_player(GameType::Yahtzee).await? {
                Some(best) => println!(
                    "Best player: {} ({:.1}% wins over {} games)",
                    best.player.name,
                    best.stats.win_percentage(),
                    best.stats.counted_games
                ),
                None => println!("Best player: -"),
            }
            match stats.best_score(GameType::Yahtzee).await? {
                Some(best) => println!(
                    "Best score: {} by {}",
                    best.result.score, best.result.player_name
                ),
                None => println!("Best score: -"),
            }
        }
    }

    Ok(())
}
