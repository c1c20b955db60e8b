use pokemon_battle_engine::{
    BattleContext, BattleRng, BattleRunner, BattleSettings, PokemonDto, PokemonInst, Proceed, SideId,
};
use std::path::Path;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const MAX_TURNS: u32 = 50;

const PLAYER_TEAM: &str = r#"[
    (species: "GLACEON", level: 75, nature: "TIMID", ability: "SNOWCLOAK",
     held_item: Some("SCOPELENS"), moves: ["ICEFANG", "FROSTBREATH"]),
    (species: "TOGEKISS", level: 70, nature: "MODEST", ability: "SERENEGRACE",
     moves: ["FIREBLAST", "DAZZLINGGLEAM", "NASTYPLOT"]),
]"#;

const OPPONENT_TEAM: &str = r#"[
    (species: "GARCHOMP", level: 65, nature: "JOLLY", ability: "SANDVEIL",
     moves: ["EARTHQUAKE", "ROCKSLIDE", "SWORDSDANCE"]),
    (species: "HONCHKROW", level: 68, nature: "ADAMANT", ability: "SUPERLUCK",
     held_item: Some("RAZORCLAW"), moves: ["NIGHTSLASH", "SHADOWBALL"]),
]"#;

fn load_team(source: &str) -> Result<Vec<PokemonInst>, Box<dyn std::error::Error>> {
    let dtos: Vec<PokemonDto> = ron::from_str(source)?;
    let mut team = Vec::with_capacity(dtos.len());
    for dto in &dtos {
        team.push(PokemonInst::from_dto(dto)?);
    }
    Ok(team)
}

/// Queue a move for every healthy active battler and a replacement for every
/// fainted one.
fn choose_actions(runner: &mut BattleRunner) {
    let ctx = runner.context();
    let mut moves = Vec::new();
    let mut switches = Vec::new();
    for id in ctx.active_battlers() {
        let battler = ctx.battler(id);
        if battler.is_fainted() {
            let replacement = ctx
                .side(battler.side)
                .roster
                .iter()
                .copied()
                .find(|&other| !ctx.is_active(other) && !ctx.battler(other).is_fainted());
            if let Some(replacement) = replacement {
                switches.push((id, replacement));
            }
        } else {
            let slot = battler
                .pokemon
                .moves
                .iter()
                .position(|m| m.pp > 0)
                .unwrap_or(0);
            moves.push((id, slot));
        }
    }

    for (id, replacement) in switches {
        if let Err(error) = runner.submit_switch(id, replacement) {
            tracing::warn!(%error, "switch rejected");
        }
    }
    for (id, slot) in moves {
        if let Err(error) = runner.submit_move(id, slot, &[]) {
            tracing::warn!(%error, "move rejected");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => BattleSettings::load(Path::new(&path))?,
        None => BattleSettings::default(),
    };
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(7);

    let mut ctx = BattleContext::new(settings);
    ctx.set_side_name(SideId::Player, "Red");
    ctx.set_side_name(SideId::Opponent, "Cynthia");
    for (index, pokemon) in load_team(PLAYER_TEAM)?.into_iter().enumerate() {
        ctx.add_battler(SideId::Player, pokemon, index == 0);
    }
    for (index, pokemon) in load_team(OPPONENT_TEAM)?.into_iter().enumerate() {
        ctx.add_battler(SideId::Opponent, pokemon, index == 0);
    }
    let mut runner = BattleRunner::new(ctx, BattleRng::seeded(seed));

    // The presenter prints each report as JSON and acknowledges it.
    let (report_tx, mut report_rx) = mpsc::channel(1);
    let (proceed_tx, mut proceed_rx) = mpsc::channel(1);
    let presenter = tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            match serde_json::to_string(&report) {
                Ok(json) => println!("{}", json),
                Err(error) => tracing::warn!(%error, "could not serialize report"),
            }
            if proceed_tx.send(Proceed).await.is_err() {
                break;
            }
        }
    });

    while !runner.is_battle_ended() && runner.turn_number() <= MAX_TURNS {
        choose_actions(&mut runner);
        runner.execute_turn_presented(&report_tx, &mut proceed_rx).await?;
    }
    drop(report_tx);
    presenter.await?;

    match runner.winner() {
        Some(side) => println!("{} wins!", runner.context().side(side).name),
        None => println!("No winner after {} turns.", MAX_TURNS),
    }

    let [player, opponent] = runner.into_parties();
    for pokemon in player.iter().chain(opponent.iter()) {
        println!("{}", ron::ser::to_string(&pokemon.to_dto())?);
    }
    Ok(())
}
