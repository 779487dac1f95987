pub mod artifacts;

mod artifacts_tests;

pub use artifacts::{
    load_features, load_model, load_target, save_features, save_model, save_target,
};
