//! Parameter sweeps over isolated runs.
//!
//! Every run gets its own `Sim` and its own `SimRng`, derived from the root
//! seed and the run's index before any run starts.  Results are therefore
//! identical with or without the `parallel` feature and independent of
//! thread scheduling.

use ix_core::{RunConfig, SimRng};
use ix_model::IntersectionModel;

use crate::{NoopObserver, RunReport, SimBuilder, SimResult};

/// Run every configuration against `model`.  Output order matches `configs`.
///
/// Each configuration is validated independently; an invalid one yields an
/// `Err` in its slot without affecting the others.
pub fn run_sweep(
    model:     &IntersectionModel,
    configs:   &[RunConfig],
    root_seed: u64,
) -> Vec<SimResult<RunReport>> {
    let mut root = SimRng::new(root_seed);
    let rngs: Vec<SimRng> = (0..configs.len()).map(|i| root.child(i as u64)).collect();
    log::debug!("sweep: {} runs, root seed {root_seed}", configs.len());

    let run_one = |config: &RunConfig, rng: SimRng| -> SimResult<RunReport> {
        SimBuilder::new(model.clone(), config.clone(), rng)
            .build()?
            .run(&mut NoopObserver)
    };

    #[cfg(not(feature = "parallel"))]
    {
        configs
            .iter()
            .zip(rngs)
            .map(|(config, rng)| run_one(config, rng))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        configs
            .par_iter()
            .zip(rngs.into_par_iter())
            .map(|(config, rng)| run_one(config, rng))
            .collect()
    }
}

/// Repeat one configuration `runs` times with independent random streams.
pub fn replicate(
    model:     &IntersectionModel,
    config:    &RunConfig,
    runs:      usize,
    root_seed: u64,
) -> Vec<SimResult<RunReport>> {
    let configs = vec![config.clone(); runs];
    run_sweep(model, &configs, root_seed)
}
