use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use term_snake::app::App;
use term_snake::game::GameConfig;
use term_snake::score::ScoreStore;

#[derive(Parser)]
#[command(name = "term-snake")]
#[command(version, about = "Terminal snake game with a persistent top score")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "10")]
    height: usize,

    /// Number of snacks on the board at once (1 being hardest)
    #[arg(long, default_value = "5")]
    snacks: usize,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value = "200")]
    tick_ms: u64,

    /// Where the top score is persisted
    #[arg(long, default_value = "top_score.txt")]
    score_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        target_count: cli.snacks,
        tick_interval_ms: cli.tick_ms,
        score_file: cli.score_file,
        ..GameConfig::default()
    };

    let store = ScoreStore::new(config.score_file.clone());
    let top_score = store.load();

    let mut app = App::new(config, top_score);
    let summary = app.run()?;

    if summary.quit {
        println!("Exiting game");
    } else {
        println!("Game over!");
    }
    println!("Snacks captured: {}", summary.captured);
    println!("Top score: {}", summary.top_score);

    store.record(summary.captured);

    Ok(())
}
