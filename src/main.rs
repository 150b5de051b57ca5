//! Tic-tac-toe arena - CLI
//!
//! Two agents play, you bet, a judge rules.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_arena::{
    ArenaConfig, BettingSession, FirstOpenPlayer, GameEvent, Judge, LlmClient, LlmJudge,
    LlmPlayer, Mark, MoveProvider, Orchestrator, RefereeJudge, Settlement,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            bet,
            side,
            rounds,
            no_judge,
        } => run_play(config, Wager::new(bet, side.into(), rounds), no_judge).await,
        Command::Demo { bet, side, rounds } => {
            run_demo(Wager::new(bet, side.into(), rounds)).await
        }
    }
}

/// What the user stakes each round, and for how many rounds.
#[derive(Debug, Clone, Copy)]
struct Wager {
    bet: f64,
    side: Mark,
    rounds: usize,
}

impl Wager {
    fn new(bet: f64, side: Mark, rounds: usize) -> Self {
        Self { bet, side, rounds }
    }
}

/// Play games between the configured LLM agents.
#[instrument(skip(config_path), fields(config_path = %config_path.display()))]
async fn run_play(config_path: std::path::PathBuf, wager: Wager, no_judge: bool) -> Result<()> {
    let config = load_arena_config(&config_path)?;

    info!("Initializing LLM clients");
    let player_x = LlmPlayer::new(
        config.player_x().name().clone(),
        LlmClient::new(config.player_x().create_llm_config()?),
    );
    let player_o = LlmPlayer::new(
        config.player_o().name().clone(),
        LlmClient::new(config.player_o().create_llm_config()?),
    );
    let judge: Option<Box<dyn Judge>> = if no_judge {
        None
    } else {
        Some(Box::new(LlmJudge::new(LlmClient::new(
            config.judge().create_llm_config()?,
        ))))
    };

    let mut session = BettingSession::new(*config.starting_balance());
    run_rounds(
        &mut session,
        &config,
        wager,
        Box::new(player_x),
        Box::new(player_o),
        judge,
    )
    .await
}

/// Play offline games with no network access.
#[instrument]
async fn run_demo(wager: Wager) -> Result<()> {
    let config = ArenaConfig::default();
    let mut session = BettingSession::new(*config.starting_balance());
    run_rounds(
        &mut session,
        &config,
        wager,
        Box::new(FirstOpenPlayer::new("Bot X")),
        Box::new(FirstOpenPlayer::new("Bot O")),
        Some(Box::new(RefereeJudge)),
    )
    .await
}

/// Bets, plays, settles and asks the judge, once per round, against one
/// wallet. Stops early once the balance falls below the minimum bet.
#[instrument(skip(session, config, player_x, player_o, judge))]
async fn run_rounds(
    session: &mut BettingSession,
    config: &ArenaConfig,
    wager: Wager,
    player_x: Box<dyn MoveProvider>,
    player_o: Box<dyn MoveProvider>,
    judge: Option<Box<dyn Judge>>,
) -> Result<()> {
    let min_bet = *config.min_bet();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(event_rx, done_tx));
    let mut orchestrator = Orchestrator::new(
        player_x,
        player_o,
        *config.max_attempts_per_turn(),
        event_tx,
    );

    for round in 1..=wager.rounds {
        if session.balance() < min_bet {
            println!(
                "\nBalance {:.2} is below the minimum bet of {:.2}. No more rounds.",
                session.balance(),
                min_bet
            );
            break;
        }

        let stake = if wager.bet > session.balance() {
            session.balance()
        } else {
            wager.bet
        };
        session.place_bet(stake, wager.side, min_bet)?;
        println!("\n=== Round {} of {} ===", round, wager.rounds);
        println!("Wallet balance: {:.2}", session.balance());
        println!("Betting {:.2} on {}", stake, wager.side);

        let (report, settlement) = match orchestrator.run_wagered(session).await {
            Ok(result) => result,
            Err(e) => {
                drop(orchestrator);
                printer.await?;
                println!("Game abandoned: {}. Your bet was returned.", e);
                return Err(e);
            }
        };
        // Wait for the printer to reach the end of this game.
        done_rx.recv().await;

        println!("\nFinal board:\n{}\n", report.grid);
        match settlement {
            Settlement::Won(amount) => {
                println!("Congratulations! {}! You won {:.2}", report.outcome, amount)
            }
            Settlement::Lost(amount) => {
                println!("Game over! {}! You lost {:.2}", report.outcome, amount)
            }
            Settlement::Push => println!("Result: it's a draw! Your bet is returned."),
        }
        println!("New wallet balance: {:.2}", session.balance());

        if let Some(judge) = &judge {
            println!("\nThe judge is evaluating the game result...");
            match judge.rule(&report.grid).await {
                Ok(verdict) => println!("Judge's verdict: {}", verdict),
                Err(e) => {
                    warn!(error = %e, "Judge failed");
                    println!("The judge could not rule: {}", e);
                }
            }
        }
    }

    drop(orchestrator);
    printer.await?;
    info!(balance = session.balance(), "Session finished");
    println!("\nFinal wallet balance: {:.2}", session.balance());
    Ok(())
}

/// Prints orchestrator events until the channel closes, signalling `done_tx`
/// after each game.
async fn print_events(
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
    done_tx: mpsc::UnboundedSender<()>,
) {
    while let Some(event) = event_rx.recv().await {
        match event {
            GameEvent::TurnStarted {
                player,
                mark,
                attempt,
            } => {
                if attempt == 1 {
                    println!("\n{}'s turn ({}):", player, mark);
                } else {
                    println!("{} tries again (attempt {}):", player, attempt);
                }
            }
            GameEvent::AgentResponded { response, .. } => {
                println!("Agent response: {}", response.trim())
            }
            GameEvent::MoveRejected { reason, .. } => println!("Invalid move! {}", reason),
            GameEvent::MoveMade { mark, mv, .. } => println!("{} plays {}", mark, mv),
            GameEvent::BoardChanged(board) => println!("{}", board),
            GameEvent::GameOver { outcome, winner } => {
                match winner {
                    Some(name) => println!("\n{} ({})", outcome, name),
                    None => println!("\n{}", outcome),
                }
                if done_tx.send(()).is_err() {
                    debug!("Round listener gone");
                }
            }
        }
    }
}

#[instrument(skip(config_path))]
fn load_arena_config(config_path: &std::path::Path) -> Result<ArenaConfig> {
    info!("Loading arena configuration");

    if config_path.exists() {
        Ok(ArenaConfig::from_file(config_path)?)
    } else {
        info!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        Ok(ArenaConfig::default())
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tictactoe_arena=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}
