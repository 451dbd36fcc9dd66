//! The simulation: an ECS world plus the schedule that advances it one tick at a time.

use std::time::{Duration, Instant};

use bevy_ecs::{
    query::With,
    schedule::{IntoScheduleConfigs, Schedule},
    world::World,
};
use tracing::{debug, info, warn};

use crate::{
    config::GameConfig,
    constants::{RAW_BOARD, TUNNEL_ROW},
    error::{GameError, GameResult},
    events::{CommandOutcome, GameCommand, TickOutcome},
    formatter,
    map::builder::Map,
    platform,
    systems::{
        components::{GameRng, PlayerControlled, PlayerLives, ScoreResource},
        ghost::ghost_system,
        item::item_system,
        movement::BufferedDirection,
        player::{player_movement_system, player_turn_system},
        profiling::{profile, SystemId, SystemTimings, Timing},
        render::{render_frame, Surface},
        state::{is_playing, load_map, reset_positions, restart, round_system, GameStage},
    },
};

/// Core game state manager built on the Bevy ECS architecture.
///
/// Owns the world (entities and resources) and the schedule of systems run each tick.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    /// Ticks slower than this are reported together with their slowest systems.
    tick_budget: Duration,
}

impl Game {
    /// Builds a game on the shipped level, ready for its first tick.
    ///
    /// Every ghost has already been given its first random heading.
    pub fn new(config: &GameConfig) -> GameResult<Game> {
        let map = Map::new(&RAW_BOARD, TUNNEL_ROW)?;
        Self::with_map(map, config)
    }

    /// Builds a game on an arbitrary, already validated map.
    pub fn with_map(map: Map, config: &GameConfig) -> GameResult<Game> {
        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::insert_resources(&mut world, map, config);
        Self::configure_schedule(&mut schedule);

        load_map(&mut world);
        reset_positions(&mut world);

        let players = world
            .query_filtered::<(), With<PlayerControlled>>()
            .iter(&world)
            .count();
        if players != 1 {
            return Err(GameError::InvalidState(format!("expected exactly one player, found {players}")));
        }

        debug!(seed = ?config.seed, tick_interval = ?config.tick_interval(), "Game initialized");

        Ok(Game {
            world,
            schedule,
            tick_budget: config.tick_interval(),
        })
    }

    fn insert_resources(world: &mut World, map: Map, config: &GameConfig) {
        world.insert_resource(map);
        world.insert_resource(GameRng(platform::rng(config.seed)));
        world.insert_resource(ScoreResource(0));
        world.insert_resource(PlayerLives::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(SystemTimings::default());
        world.insert_resource(Timing::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let player_turn_system = profile(SystemId::PlayerTurn, player_turn_system);
        let player_movement_system = profile(SystemId::PlayerMovement, player_movement_system);
        let ghost_system = profile(SystemId::Ghost, ghost_system);
        let item_system = profile(SystemId::Item, item_system);
        let round_system = profile(SystemId::Round, round_system);

        // Each system re-checks the stage, so a game over raised by the ghosts stops the rest of the tick.
        schedule.add_systems(
            (
                player_turn_system.run_if(is_playing),
                player_movement_system.run_if(is_playing),
                ghost_system.run_if(is_playing),
                item_system.run_if(is_playing),
                round_system.run_if(is_playing),
            )
                .chain(),
        );
    }

    /// Applies a player command.
    ///
    /// While the game is over, any movement key (or the restart key) starts a new game.
    pub fn handle_command(&mut self, command: GameCommand) -> CommandOutcome {
        let stage = *self.world.resource::<GameStage>();

        match (command, stage) {
            (GameCommand::Exit, _) => CommandOutcome::Exit,
            (GameCommand::MovePlayer(_) | GameCommand::Restart, GameStage::GameOver) => {
                restart(&mut self.world);
                CommandOutcome::Restarted
            }
            (GameCommand::Restart, GameStage::Playing) => CommandOutcome::Ignored,
            (GameCommand::MovePlayer(direction), GameStage::Playing) => {
                let mut players = self
                    .world
                    .query_filtered::<&mut BufferedDirection, With<PlayerControlled>>();
                let mut buffered_any = false;
                for mut buffered in players.iter_mut(&mut self.world) {
                    *buffered = BufferedDirection::Some { direction };
                    buffered_any = true;
                }

                if buffered_any {
                    CommandOutcome::Buffered
                } else {
                    CommandOutcome::Ignored
                }
            }
        }
    }

    /// Advances the simulation by one fixed step.
    ///
    /// Returns [`TickOutcome::Halted`] once the game is over; a tick requested while over
    /// changes nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Halted;
        }

        let tick = self.world.resource::<Timing>().increment_tick();
        formatter::increment_tick();

        let start = Instant::now();
        self.schedule.run(&mut self.world);
        let total = start.elapsed();

        let timings = self.world.resource::<SystemTimings>();
        timings.add_timing(SystemId::Total, total, tick);
        if total > self.tick_budget {
            let systems = timings
                .slowest_systems()
                .iter()
                .map(|(id, duration)| format!("{id} ({duration:.2?})"))
                .collect::<Vec<_>>()
                .join(", ");
            warn!(total = ?total, tick, budget = ?self.tick_budget, systems, "Tick took longer than its period");
        }

        if self.is_over() {
            info!(score = self.score(), "Game over");
            TickOutcome::Halted
        } else {
            TickOutcome::Continue
        }
    }

    /// Renders the current state onto `surface`.
    pub fn draw(&mut self, surface: &mut impl Surface) -> GameResult<()> {
        render_frame(&mut self.world, surface)
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<PlayerLives>().0
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn is_over(&self) -> bool {
        self.stage() == GameStage::GameOver
    }

    /// Aligned per-system timing lines for display or logging.
    pub fn timing_report(&self) -> Vec<String> {
        let tick = self.world.resource::<Timing>().current_tick();
        self.world
            .resource::<SystemTimings>()
            .format_timing_display(tick)
            .into_vec()
    }
}
