use std::collections::HashMap;

use pipes_core::{CanvasSize, Direction, PipeId, Thickness};
use pipes_simulation::{Config, Simulation};
use pipes_world::query;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pipes_stay_in_bounds_and_only_turn_perpendicular(
        columns in 1u32..40,
        rows in 1u32..20,
        pipe_count in 1u32..8,
        turn_chance in 1u32..12,
        reset_interval in 1u32..60,
        seed in any::<u64>(),
    ) {
        let size = CanvasSize::new(columns, rows).expect("valid canvas");
        let config = Config::new(pipe_count, reset_interval, 0.02, None, Thickness::Thin, turn_chance)
            .expect("valid config");
        let mut simulation = Simulation::new(config, size, ChaCha8Rng::seed_from_u64(seed));
        let expected = usize::try_from(pipe_count).expect("small count");

        for _ in 0..80 {
            let headings: HashMap<PipeId, Direction> = query::pipe_view(simulation.world())
                .iter()
                .map(|pipe| (pipe.id, pipe.heading))
                .collect();

            simulation.tick();
            prop_assert_eq!(query::pipe_count(simulation.world()), expected);

            for pipe in query::pipe_view(simulation.world()).iter() {
                prop_assert!(size.contains(pipe.cell));
                if let Some(previous) = headings.get(&pipe.id) {
                    prop_assert!(
                        *previous == pipe.heading || previous.is_perpendicular_to(pipe.heading),
                        "{:?} reversed from {:?} to {:?}",
                        pipe.id,
                        previous,
                        pipe.heading
                    );
                }
            }

            let _ = simulation.maybe_reset();
            prop_assert_eq!(query::pipe_count(simulation.world()), expected);
        }
    }
}
