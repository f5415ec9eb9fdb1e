/*!
atajos-lib
=====

This crate builds the interconnect topology of a simulated on-chip network before the simulation
starts. It constructs a base mesh, cube or ring router graph, synthesizes or loads a
traffic-demand matrix, inserts a budget-bounded set of long-range links chosen to cut
demand-weighted hop counts, and classifies every link direction into deadlock-safe
virtual-channel turn classes. The resulting routers and links are handed over to the host
simulation framework, which owns them from then on.

# Usage

This crate is `atajos-lib`. To use it add `atajos-lib` to your dependencies in your project's
`Cargo.toml`.

```toml
[dependencies]
atajos-lib = "0.1"
```

The host describes the construction with a configuration object and provides its endpoint list
and a seeded generator:

```ignore
use atajos_lib::topology::prelude::*;
use rand::SeedableRng;

let config = Config::new(&configuration_value);
let mut rng = StdRng::seed_from_u64(seed);
let network = build_network(&config, &endpoints, &mut rng)?;
```

Construction is a single-threaded, deterministic batch: the only randomness is the random
link-selection strategy, drawing from the generator given by the caller.

*/

pub use quantifiable_derive::Quantifiable;//the derive macro

pub mod config;
pub mod error;
pub mod quantify;
pub mod matrix;
pub mod traffic;
pub mod longrange;
pub mod direction;
pub mod topology;
