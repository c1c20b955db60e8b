use crate::battle::battler::{BattlerId, SideId};
use crate::battle::state::{BattleContext, BattleRng};
use crate::config::BattleSettings;
use crate::pokemon::{PokemonDto, PokemonInst, StatusCondition};

/// A builder for creating test Pokemon instances with common defaults.
///
/// The default ability has no registered modifier, so a Pokemon built without
/// `with_ability` never changes the numbers under test.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("PIKACHU", 25)
///     .with_moves(&["THUNDERBOLT"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    dto: PokemonDto,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: &str, level: u32) -> Self {
        Self {
            dto: PokemonDto {
                species: species.to_string(),
                nickname: None,
                level,
                exp: None,
                ivs: [0; 6],
                evs: [0; 6],
                nature: "HARDY".to_string(),
                ability: "PRESSURE".to_string(),
                held_item: None,
                moves: vec!["TACKLE".to_string()],
                move_pp: Vec::new(),
                status: None,
                current_hp: None,
            },
        }
    }

    /// Sets the moves for the test Pokemon.
    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.dto.moves = moves.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Current PP per move slot.
    pub fn with_pp(mut self, pp: &[u8]) -> Self {
        self.dto.move_pp = pp.to_vec();
        self
    }

    pub fn with_ability(mut self, ability: &str) -> Self {
        self.dto.ability = ability.to_string();
        self
    }

    pub fn with_item(mut self, item: &str) -> Self {
        self.dto.held_item = Some(item.to_string());
        self
    }

    /// Sets the status condition for the test Pokemon.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.dto.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.dto.current_hp = Some(hp);
        self
    }

    pub fn with_ivs(mut self, ivs: [u8; 6]) -> Self {
        self.dto.ivs = ivs;
        self
    }

    pub fn with_evs(mut self, evs: [u16; 6]) -> Self {
        self.dto.evs = evs;
        self
    }

    pub fn with_nature(mut self, nature: &str) -> Self {
        self.dto.nature = nature.to_string();
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        match PokemonInst::from_dto(&self.dto) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to build test Pokemon {:?}: {}", self.dto.species, err),
        }
    }
}

/// Creates a 1v1 battle with both Pokemon on the field.
pub fn create_test_context(
    player: TestPokemonBuilder,
    opponent: TestPokemonBuilder,
) -> (BattleContext, BattlerId, BattlerId) {
    let mut ctx = BattleContext::new(BattleSettings::default());
    let player = ctx.add_battler(SideId::Player, player.build(), true);
    let opponent = ctx.add_battler(SideId::Opponent, opponent.build(), true);
    (ctx, player, opponent)
}

/// Level 75 Glaceon with Ice Fang against a level 65 Garchomp (215 HP).
/// Without a crit, a max roll of Ice Fang deals exactly 200.
pub fn glaceon_vs_garchomp(item: Option<&str>) -> (BattleContext, BattlerId, BattlerId) {
    let mut glaceon = TestPokemonBuilder::new("GLACEON", 75)
        .with_moves(&["ICEFANG"])
        .with_ivs([0, 31, 0, 0, 0, 0])
        .with_evs([0, 104, 0, 0, 0, 0])
        .with_nature("TIMID");
    if let Some(item) = item {
        glaceon = glaceon.with_item(item);
    }
    let garchomp = TestPokemonBuilder::new("GARCHOMP", 65)
        .with_moves(&["EARTHQUAKE"])
        .with_ivs([0, 0, 31, 0, 0, 0])
        .with_evs([0, 0, 92, 0, 0, 0])
        .with_nature("JOLLY");
    create_test_context(glaceon, garchomp)
}

/// A seeded stream for tests where the exact outcome does not matter.
pub fn predictable_rng() -> BattleRng {
    BattleRng::seeded(42)
}
