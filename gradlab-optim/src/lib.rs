//! # gradlab-optim
//!
//! Gradient descent and momentum gradient descent written against the
//! public API of `gradlab-core`, a generic minimization loop, and the toy
//! objectives they are compared on.
//!
//! ```
//! use gradlab_optim::objectives::{point_parameter, Quadratic};
//! use gradlab_optim::{minimize, GradientDescent, MinimizeConfig};
//! use gradlab_core::nn::Module;
//!
//! let objective = Quadratic::new(1.0, &[0.0, 0.0]).unwrap();
//! let p = point_parameter(&[1.0, -1.0]).unwrap();
//! let mut optimizer = GradientDescent::new(vec![p.clone()], 0.5).unwrap();
//! let outcome = minimize(|| objective.forward(&p), &mut optimizer, &MinimizeConfig::default()).unwrap();
//! assert!(outcome.converged);
//! ```

pub mod error;
pub mod gradient_descent;
pub mod landscape;
pub mod minimize;
pub mod momentum;
pub mod objectives;
pub mod optimizer;
pub mod trajectory;

pub use error::OptimError;
pub use gradient_descent::GradientDescent;
pub use landscape::Landscape;
pub use minimize::{minimize, MinimizeConfig, MinimizeOutcome};
pub use momentum::MomentumGradientDescent;
pub use optimizer::Optimizer;
pub use trajectory::Trajectory;
