//! Bot that plays every game against an in-memory store.
//!
//! Useful for balance tuning: point it at a config file, pick a seed, and
//! read the aggregate win rates and cookie flows off the log. The same
//! seed always replays the same session.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use cookiebot_engine::commands::{CastReply, DealReply, PurchaseReply, SlotsReply};
use cookiebot_engine::games::blackjack::Outcome;
use cookiebot_engine::{GameCommands, GameRng, MemoryStore};
use cookiebot_types::{AccountKey, GamesConfig};

#[derive(Parser)]
#[command(name = "cookiebot-simulator", about = "Play the cookiebot games on a loop.")]
struct Args {
    /// YAML game-balance config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the whole session.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated players (one community).
    #[arg(long, default_value_t = 4)]
    players: u64,

    /// Starting balance granted to each player.
    #[arg(long, default_value_t = 10_000)]
    bankroll: u64,

    /// Slot spins per player.
    #[arg(long, default_value_t = 1_000)]
    spins: u64,

    /// Blackjack hands per player.
    #[arg(long, default_value_t = 1_000)]
    hands: u64,

    /// Fishing casts per player.
    #[arg(long, default_value_t = 1_000)]
    casts: u64,

    /// Wager for every spin and hand.
    #[arg(long, default_value_t = 10)]
    wager: u64,

    #[arg(long, default_value = "info")]
    log_level: String,
}

const COMMUNITY: u64 = 1;

#[derive(Default)]
struct Tally {
    spins: u64,
    spin_wins: u64,
    hands: u64,
    hand_outcomes: [u64; 6],
    casts: u64,
    catches: u64,
    broke: u64,
}

fn outcome_slot(outcome: Outcome) -> usize {
    match outcome {
        Outcome::Blackjack => 0,
        Outcome::Win => 1,
        Outcome::Push => 2,
        Outcome::Lose => 3,
        Outcome::DealerBlackjack => 4,
        Outcome::Bust => 5,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = Level::from_str(&args.log_level).context("invalid log level")?;
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            GamesConfig::from_yaml(&contents).context("could not parse config")?
        }
        None => GamesConfig::default(),
    };
    config.validate().context("invalid config")?;

    info!(
        seed = args.seed,
        players = args.players,
        spins = args.spins,
        hands = args.hands,
        casts = args.casts,
        "starting simulation"
    );

    let mut commands = GameCommands::with_rng(
        MemoryStore::new(),
        config,
        GameRng::from_seed(args.seed),
    );

    let mut tally = Tally::default();
    for player in 1..=args.players {
        let key = AccountKey::new(player, COMMUNITY);
        commands.set_balance(key, args.bankroll)?;

        run_slots(&mut commands, key, &args, &mut tally)?;
        run_blackjack(&mut commands, key, &args, &mut tally)?;
        run_fishing(&mut commands, key, &args, &mut tally)?;

        let summary = commands.balance(key)?;
        let profile = commands.fishing_stats(key)?;
        info!(
            player,
            balance = summary.balance,
            max_balance = summary.max_balance,
            total_earned = summary.total_earned,
            total_lost = summary.total_lost,
            fish_caught = profile.total_caught,
            fishing_level = profile.level,
            longest_dry_streak = profile.longest_dry_streak,
            "player done"
        );
    }

    let [naturals, wins, pushes, losses, dealer_naturals, busts] = tally.hand_outcomes;
    info!(
        spins = tally.spins,
        spin_wins = tally.spin_wins,
        hands = tally.hands,
        naturals,
        wins,
        pushes,
        losses,
        dealer_naturals,
        busts,
        casts = tally.casts,
        catches = tally.catches,
        broke = tally.broke,
        "simulation complete"
    );
    Ok(())
}

fn run_slots(
    commands: &mut GameCommands<MemoryStore>,
    key: AccountKey,
    args: &Args,
    tally: &mut Tally,
) -> Result<()> {
    for _ in 0..args.spins {
        match commands.slots(key, args.wager)? {
            SlotsReply::Spun { payout, .. } => {
                tally.spins += 1;
                if payout > 0 {
                    tally.spin_wins += 1;
                }
            }
            SlotsReply::InsufficientFunds => {
                tally.broke += 1;
                break;
            }
        }
    }
    Ok(())
}

fn run_blackjack(
    commands: &mut GameCommands<MemoryStore>,
    key: AccountKey,
    args: &Args,
    tally: &mut Tally,
) -> Result<()> {
    for _ in 0..args.hands {
        let mut hand = match commands.blackjack_deal(key, args.wager)? {
            DealReply::Dealt(hand) => hand,
            DealReply::InsufficientFunds => {
                tally.broke += 1;
                break;
            }
        };

        // Basic-ish strategy: draw to 16, stand on 17+.
        let mut busted = None;
        while hand.player_total() < 17 {
            let reply = commands.blackjack_hit(&mut hand)?;
            if let Some(settlement) = reply.settlement {
                busted = Some(settlement);
                break;
            }
        }
        let settlement = match busted {
            Some(settlement) => settlement,
            None => commands.blackjack_stand(key, &mut hand)?,
        };
        tally.hands += 1;
        tally.hand_outcomes[outcome_slot(settlement.outcome)] += 1;
    }
    Ok(())
}

fn run_fishing(
    commands: &mut GameCommands<MemoryStore>,
    key: AccountKey,
    args: &Args,
    tally: &mut Tally,
) -> Result<()> {
    // Bait on every tenth cast, funded from winnings.
    for cast in 0..args.casts {
        let with_bait = cast % 10 == 0;
        if with_bait {
            if let PurchaseReply::CannotAfford { .. } = commands.buy_bait(key, "Worm", 1)? {
                tally.broke += 1;
                continue;
            }
        }
        match commands.cast(key, with_bait)? {
            CastReply::Caught { .. } => {
                tally.casts += 1;
                tally.catches += 1;
            }
            CastReply::Missed { .. } => tally.casts += 1,
            CastReply::NoBait => {}
        }
    }
    Ok(())
}
