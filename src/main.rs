//! Highway Dash entry point
//!
//! Native builds run a headless session with the demo autopilot at the wheel
//! and log the HUD as it goes. Browser builds drive `Game` from their own
//! render loop.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec3;
    use highway_dash::consts::SIM_DT;
    use highway_dash::sim::{Control, GameState, HudSnapshot, InputEvent, InputState};
    use highway_dash::{Game, Hud, Scene, Tuning};

    /// Command line options
    pub struct Options {
        pub seed: u64,
        pub tuning: Option<String>,
        pub max_seconds: f32,
        pub json: bool,
    }

    impl Options {
        pub fn from_args() -> Self {
            let mut options = Self {
                seed: 0x5eed,
                tuning: None,
                max_seconds: 120.0,
                json: false,
            };

            let mut args = std::env::args().skip(1);
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => match args.next().map(|s| s.parse()) {
                        Some(Ok(seed)) => options.seed = seed,
                        _ => log::warn!("--seed expects an integer, keeping {}", options.seed),
                    },
                    "--tuning" => options.tuning = args.next(),
                    "--seconds" => match args.next().map(|s| s.parse()) {
                        Some(Ok(secs)) => options.max_seconds = secs,
                        _ => log::warn!("--seconds expects a number"),
                    },
                    "--json" => options.json = true,
                    other => log::warn!("Ignoring unknown argument: {}", other),
                }
            }
            options
        }
    }

    /// Scene that only tracks which enemies exist
    #[derive(Default)]
    struct HeadlessScene {
        live: usize,
        peak: usize,
    }

    impl Scene for HeadlessScene {
        fn add_enemy(&mut self, id: u32, position: Vec3) {
            self.live += 1;
            self.peak = self.peak.max(self.live);
            log::trace!("+ enemy {} at {:?}", id, position);
        }

        fn remove_enemy(&mut self, id: u32) {
            self.live = self.live.saturating_sub(1);
            log::trace!("- enemy {}", id);
        }

        fn render(&mut self, _state: &GameState) {}
    }

    /// HUD that logs whenever the score changes
    #[derive(Default)]
    struct LogHud {
        last_logged: u64,
        final_score: Option<u64>,
    }

    impl Hud for LogHud {
        fn update(&mut self, snapshot: HudSnapshot) {
            if snapshot.score != self.last_logged {
                log::debug!("score {} | speed {}", snapshot.score, snapshot.speed);
                self.last_logged = snapshot.score;
            }
        }

        fn show_game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
        }

        fn hide_game_over(&mut self) {
            self.final_score = None;
        }
    }

    /// Demo driver: full throttle, dodge into the clearest lane
    struct Autopilot {
        held: InputState,
    }

    impl Autopilot {
        fn new() -> Self {
            Self {
                held: InputState::default(),
            }
        }

        fn desired(&self, state: &GameState) -> InputState {
            let player = &state.player;
            let lanes = state.tuning.lanes;
            let lookahead = 160.0;

            // Distance to the nearest enemy ahead in each lane
            let gap = |lane_x: f32| {
                state
                    .enemies
                    .iter()
                    .filter(|e| (e.pos.x - lane_x).abs() < state.tuning.car_width)
                    .map(|e| player.z() - e.z())
                    .filter(|d| *d > -state.tuning.car_length && *d < lookahead)
                    .fold(lookahead, f32::min)
            };

            let target = lanes
                .iter()
                .copied()
                .max_by(|a, b| {
                    let score = |x: f32| gap(x) - (x - player.pos.x).abs() * 0.5;
                    score(*a).total_cmp(&score(*b))
                })
                .unwrap_or(player.pos.x);

            let offset = target - player.pos.x;
            InputState {
                left: offset < -1.0,
                right: offset > 1.0,
                accelerate: true,
                brake: false,
            }
        }

        fn drive(&mut self, game: &mut Game) {
            let want = self.desired(&game.state);
            for control in [Control::Left, Control::Right, Control::Accelerate, Control::Brake] {
                if want.is_held(control) != self.held.is_held(control) {
                    let event = if want.is_held(control) {
                        InputEvent::press(control)
                    } else {
                        InputEvent::release(control)
                    };
                    game.queue_input(event);
                }
            }
            self.held = want;
        }
    }

    #[derive(serde::Serialize)]
    struct Summary {
        seed: u64,
        final_score: u64,
        seconds: f64,
        distance: f32,
        peak_traffic: usize,
        crashed: bool,
    }

    pub fn run(options: Options) {
        let tuning = options
            .tuning
            .as_deref()
            .map(Tuning::load)
            .unwrap_or_default();
        let mut game = Game::with_tuning(options.seed, tuning);
        let start_z = game.state.player.z();

        let mut scene = HeadlessScene::default();
        let mut hud = LogHud::default();
        let mut autopilot = Autopilot::new();

        let max_frames = (options.max_seconds / SIM_DT) as u64;
        for _ in 0..max_frames {
            autopilot.drive(&mut game);
            game.frame(SIM_DT, &mut scene, &mut hud);
            if hud.final_score.is_some() {
                break;
            }
        }

        let summary = Summary {
            seed: options.seed,
            final_score: hud.final_score.unwrap_or(game.state.score),
            seconds: game.state.elapsed,
            distance: start_z - game.state.player.z(),
            peak_traffic: scene.peak,
            crashed: hud.final_score.is_some(),
        };

        if options.json {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to encode summary: {}", e),
            }
        } else {
            println!(
                "Seed {}: score {} after {:.1}s, {:.0} units driven{}",
                summary.seed,
                summary.final_score,
                summary.seconds,
                summary.distance,
                if summary.crashed { " (crashed)" } else { "" }
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Highway Dash (native) starting...");
    headless::run(headless::Options::from_args());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive highway_dash::Game from their own render loop
}
