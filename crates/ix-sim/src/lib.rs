//! `ix-sim`: queueing tick loop for a signalised intersection.
//!
//! # Tick loop
//!
//! ```text
//! while !(pass complete && now >= horizon):
//!   ① Pass start: at the top of each phase pass, sample arrivals once per
//!                  arm (`ArrivalSampling::PerCycle`).
//!   ② Arrivals   with `ArrivalSampling::PerTick`, sample arrivals once
//!                  per arm every tick instead.
//!   ③ Service    for each arm green in the current phase, ascending:
//!                    non-empty queue → Bernoulli(service_probability)
//!                    success        → pop oldest, record delay
//!   ④ Sample     update each arm's running max queue length;
//!                  every `snapshot_interval_ticks`, emit a queue snapshot.
//!   ⑤ Advance    tick += 1, move through the phase list.
//! ```
//!
//! A pass that starts before the horizon always completes, so a run can end
//! up to one cycle past `horizon_secs`; `RunReport::elapsed` has the real
//! end time.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`sweep`] on Rayon's thread pool.                 |
//! | `serde`    | Serialize reports and events.                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ix_core::RunConfig;
//! use ix_model::presets;
//! use ix_sim::{NoopObserver, SimBuilder};
//!
//! let config = RunConfig::uniform(4, 400.0, 1_800).with_seed(42);
//! let mut sim = SimBuilder::seeded(presets::plus(4), config).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod cancel;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod queue;
pub mod sim;
pub mod sweep;


pub use builder::SimBuilder;
pub use cancel::CancelToken;
pub use error::{SimError, SimResult};
pub use metrics::{ArmMetrics, MetricsAccumulator, RunReport};
pub use observer::{EventLog, NoopObserver, SimEvent, SimObserver};
pub use queue::QueueState;
pub use sim::Sim;
